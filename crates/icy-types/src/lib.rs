pub mod api;
pub mod models;

pub use models::{
    Brand, Campaign, CampaignStatus, FollowerBucket, Influencer, InfluencerSummary, MessageStatus,
    OutreachMessage, Platform, User,
};
