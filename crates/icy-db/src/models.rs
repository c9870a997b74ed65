//! Database row types. These map directly to SQLite rows and are converted
//! into the `icy-types` records at the store boundary.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use icy_types::{
    Brand, Campaign, CampaignStatus, Influencer, MessageStatus, OutreachMessage, Platform, User,
};
use uuid::Uuid;

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub created_at: String,
}

pub struct BrandRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub website: Option<String>,
    pub user_id: String,
    pub created_at: String,
}

pub struct InfluencerRow {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub platform: String,
    pub category: String,
    pub followers: i64,
    pub avg_views: Option<i64>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub channel_id: Option<String>,
    pub brand_fit_score: Option<i64>,
    /// JSON array of strings.
    pub recent_content: String,
    pub created_at: String,
}

pub struct CampaignRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub brand_id: String,
    pub user_id: String,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub subject: String,
    pub content: String,
    pub influencer_id: String,
    pub campaign_id: Option<String>,
    pub user_id: String,
    pub status: String,
    pub sent_at: Option<String>,
    pub email_used: Option<String>,
    pub ai_generated: bool,
    pub created_at: String,
}

// -- Inserts --

#[derive(Debug, Clone)]
pub struct NewBrand {
    pub name: String,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub website: Option<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInfluencer {
    pub name: String,
    pub handle: String,
    pub platform: Platform,
    pub category: String,
    pub followers: i64,
    pub avg_views: Option<i64>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub channel_id: Option<String>,
    pub brand_fit_score: Option<i64>,
    pub recent_content: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub brand_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub subject: String,
    pub content: String,
    pub influencer_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub user_id: Uuid,
    pub email_used: Option<String>,
    pub ai_generated: bool,
}

/// Partial influencer update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct InfluencerUpdate {
    pub avg_views: Option<i64>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub brand_fit_score: Option<i64>,
}

/// Listing predicate for influencers. Results are always ordered by
/// followers, highest first.
#[derive(Debug, Clone)]
pub struct InfluencerFilter {
    pub category: Option<String>,
    pub platform: Option<Platform>,
    pub min_followers: Option<i64>,
    /// Exclusive.
    pub max_followers: Option<i64>,
    pub limit: u32,
}

impl Default for InfluencerFilter {
    fn default() -> Self {
        Self {
            category: None,
            platform: None,
            min_followers: None,
            max_followers: None,
            limit: 50,
        }
    }
}

// -- Conversions --

/// SQLite stores our defaults as RFC 3339 with milliseconds, but rows written
/// by hand may use `datetime('now')`'s "YYYY-MM-DD HH:MM:SS".
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .with_context(|| format!("Corrupt timestamp '{}'", raw))
}

fn parse_id(raw: &str) -> Result<Uuid> {
    raw.parse().with_context(|| format!("Corrupt id '{}'", raw))
}

impl UserRow {
    pub fn into_model(self) -> Result<User> {
        Ok(User {
            id: parse_id(&self.id)?,
            username: self.username,
            email: self.email,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl BrandRow {
    pub fn into_model(self) -> Result<Brand> {
        Ok(Brand {
            id: parse_id(&self.id)?,
            name: self.name,
            description: self.description,
            target_audience: self.target_audience,
            website: self.website,
            user_id: parse_id(&self.user_id)?,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl InfluencerRow {
    pub fn into_model(self) -> Result<Influencer> {
        let recent_content: Vec<String> = serde_json::from_str(&self.recent_content)
            .with_context(|| format!("Corrupt recent_content on influencer '{}'", self.id))?;

        Ok(Influencer {
            id: parse_id(&self.id)?,
            platform: self.platform.parse()?,
            name: self.name,
            handle: self.handle,
            category: self.category,
            followers: self.followers,
            avg_views: self.avg_views,
            email: self.email,
            avatar: self.avatar,
            channel_id: self.channel_id,
            brand_fit_score: self.brand_fit_score,
            recent_content,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl CampaignRow {
    pub fn into_model(self) -> Result<Campaign> {
        Ok(Campaign {
            id: parse_id(&self.id)?,
            name: self.name,
            description: self.description,
            status: self.status.parse::<CampaignStatus>()?,
            brand_id: parse_id(&self.brand_id)?,
            user_id: parse_id(&self.user_id)?,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl MessageRow {
    pub fn into_model(self) -> Result<OutreachMessage> {
        Ok(OutreachMessage {
            id: parse_id(&self.id)?,
            subject: self.subject,
            content: self.content,
            influencer_id: parse_id(&self.influencer_id)?,
            campaign_id: self.campaign_id.as_deref().map(parse_id).transpose()?,
            user_id: parse_id(&self.user_id)?,
            status: self.status.parse::<MessageStatus>()?,
            sent_at: self.sent_at.as_deref().map(parse_timestamp).transpose()?,
            email_used: self.email_used,
            ai_generated: self.ai_generated,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }

    pub fn status(&self) -> Result<MessageStatus> {
        Ok(self.status.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_accepts_both_formats() {
        let rfc = parse_timestamp("2025-03-01T12:30:00.250Z").unwrap();
        let naive = parse_timestamp("2025-03-01 12:30:00").unwrap();
        assert_eq!(rfc.timestamp(), naive.timestamp());
        assert!(parse_timestamp("yesterday").is_err());
    }
}
