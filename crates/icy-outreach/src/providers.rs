//! Seams to the external search, text-generation and email services.

use anyhow::Result;
use async_trait::async_trait;
use icy_clients::{ChannelDetails, Email, GeminiClient, SendGridClient, YouTubeClient};

/// Video-platform channel search: ids first, then statistics for a batch.
#[async_trait]
pub trait ChannelSearch: Send + Sync {
    async fn search_channel_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>>;
    async fn channel_details(&self, channel_ids: &[String]) -> Result<Vec<ChannelDetails>>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait MailDelivery: Send + Sync {
    async fn deliver(&self, email: &Email) -> Result<()>;
}

#[async_trait]
impl ChannelSearch for YouTubeClient {
    async fn search_channel_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>> {
        Ok(YouTubeClient::search_channel_ids(self, query, max_results).await?)
    }

    async fn channel_details(&self, channel_ids: &[String]) -> Result<Vec<ChannelDetails>> {
        Ok(YouTubeClient::channel_details(self, channel_ids).await?)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.generate_content(prompt).await?)
    }
}

#[async_trait]
impl MailDelivery for SendGridClient {
    async fn deliver(&self, email: &Email) -> Result<()> {
        Ok(self.send(email).await?)
    }
}
