use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Returned when a stored or submitted string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// -- Enums --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Instagram,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Instagram => "instagram",
        }
    }
}

impl FromStr for Platform {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "youtube" => Ok(Self::Youtube),
            "instagram" => Ok(Self::Instagram),
            other => Err(ParseEnumError::new("platform", other)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outreach message lifecycle. Only `Draft -> Sent` is driven by this
/// service; the later states are reserved for delivery webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Draft,
    Sent,
    Delivered,
    Opened,
    Replied,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Opened => "opened",
            Self::Replied => "replied",
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl FromStr for MessageStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "opened" => Ok(Self::Opened),
            "replied" => Ok(Self::Replied),
            other => Err(ParseEnumError::new("message status", other)),
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(ParseEnumError::new("campaign status", other)),
        }
    }
}

/// Follower-count ranges offered by the influencer browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerBucket {
    Thousands,
    TensOfThousands,
    HundredsOfThousands,
    Millions,
}

impl FollowerBucket {
    /// Inclusive lower bound and exclusive upper bound.
    pub fn range(&self) -> (i64, Option<i64>) {
        match self {
            Self::Thousands => (1_000, Some(10_000)),
            Self::TensOfThousands => (10_000, Some(100_000)),
            Self::HundredsOfThousands => (100_000, Some(1_000_000)),
            Self::Millions => (1_000_000, None),
        }
    }
}

impl FromStr for FollowerBucket {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1k-10k" => Ok(Self::Thousands),
            "10k-100k" => Ok(Self::TensOfThousands),
            "100k-1m" => Ok(Self::HundredsOfThousands),
            "1m+" => Ok(Self::Millions),
            other => Err(ParseEnumError::new("follower range", other)),
        }
    }
}

// -- Records --

/// Password hashes never leave the store, so they are not part of this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub website: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
}

impl Influencer {
    pub fn summary(&self) -> InfluencerSummary {
        InfluencerSummary {
            id: self.id,
            name: self.name.clone(),
            handle: self.handle.clone(),
            category: self.category.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// The slice of an influencer echoed back alongside a generated draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerSummary {
    pub id: Uuid,
    pub name: String,
    pub handle: String,
    pub category: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub brand_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachMessage {
    pub id: Uuid,
    pub subject: String,
    pub content: String,
    pub influencer_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub user_id: Uuid,
    pub status: MessageStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub email_used: Option<String>,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}
