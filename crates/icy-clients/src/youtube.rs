use serde::Deserialize;

use crate::error::{Result, check_status};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The search endpoint rejects larger pages.
pub const MAX_SEARCH_RESULTS: u32 = 50;

/// YouTube Data API v3 client, restricted to channel search and channel statistics.
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// A channel with the statistics discovery needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub custom_url: Option<String>,
    pub thumbnail: Option<String>,
    /// Zero when the channel hides its subscriber count.
    pub subscriber_count: u64,
}

// -- Wire types --

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    snippet: ChannelSnippet,
    #[serde(default)]
    statistics: ChannelStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    description: String,
    custom_url: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Counts arrive as decimal strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
}

impl From<ChannelItem> for ChannelDetails {
    fn from(item: ChannelItem) -> Self {
        let thumbs = item.snippet.thumbnails;
        let thumbnail = thumbs.high.or(thumbs.medium).or(thumbs.default).map(|t| t.url);
        let subscriber_count = item
            .statistics
            .subscriber_count
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);

        Self {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            custom_url: item.snippet.custom_url,
            thumbnail,
            subscriber_count,
        }
    }
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Search for channels matching `query`, returning their ids in rank order.
    pub async fn search_channel_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>> {
        let max_results = max_results.clamp(1, MAX_SEARCH_RESULTS).to_string();
        let url = format!("{}/search", self.base_url);

        tracing::debug!(query, max_results = %max_results, "YouTube channel search");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "channel"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let body: ListResponse<SearchItem> = resp.json().await?;
        Ok(body.items.into_iter().filter_map(|item| item.id.channel_id).collect())
    }

    /// Fetch snippet and statistics for a batch of channel ids in one call.
    pub async fn channel_details(&self, channel_ids: &[String]) -> Result<Vec<ChannelDetails>> {
        if channel_ids.is_empty() {
            return Ok(vec![]);
        }

        let ids = channel_ids.join(",");
        let url = format!("{}/channels", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet,statistics"),
                ("id", ids.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let body: ListResponse<ChannelItem> = resp.json().await?;
        tracing::debug!(requested = channel_ids.len(), returned = body.items.len(), "Fetched channel details");

        Ok(body.items.into_iter().map(ChannelDetails::from).collect())
    }
}
