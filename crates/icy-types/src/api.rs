use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Influencer, InfluencerSummary, MessageStatus};

// -- Influencers --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerQuery {
    pub category: Option<String>,
    pub platform: Option<String>,
    /// One of `1k-10k`, `10k-100k`, `100k-1m`, `1m+`.
    pub followers: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BrandFitRequest {
    pub brand_description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandFitResponse {
    pub influencer_id: Uuid,
    pub brand_fit_score: u8,
}

// -- Outreach messages --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateMessageRequest {
    pub influencer_id: Uuid,
    pub user_id: Option<Uuid>,
    pub brand_name: Option<String>,
    pub brand_description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMessageResponse {
    pub message_id: Uuid,
    pub subject: String,
    pub content: String,
    pub influencer: InfluencerSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendMessageRequest {
    pub message_id: Uuid,
    pub to_email: String,
    pub from_email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: String,
    pub sent_to: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateMessageRequest {
    pub subject: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryEventRequest {
    pub status: MessageStatus,
}

// -- Discovery --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiscoverRequest {
    pub category: Option<String>,
    #[serde(default = "default_discover_count")]
    pub count: u32,
}

fn default_discover_count() -> u32 {
    50
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverResponse {
    pub success: bool,
    pub message: String,
    pub inserted: usize,
    pub fallback_used: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchRequest {
    pub query: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_results() -> u32 {
    20
}

/// Shared by the search and demo-populate endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedInfluencersResponse {
    pub success: bool,
    pub message: String,
    pub influencers: Vec<Influencer>,
}

// -- Brands & campaigns --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBrandRequest {
    pub name: String,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub website: Option<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub brand_id: Uuid,
    pub user_id: Uuid,
}

// -- Demo --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoUserResponse {
    pub success: bool,
    pub message: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
