//! Outreach workflows: influencer discovery, AI-drafted messages and delivery.
//!
//! Every external service sits behind a trait in [`providers`], so the
//! workflows can be exercised against in-memory doubles.

pub mod classify;
pub mod discovery;
pub mod drafts;
pub mod error;
pub mod generator;
pub mod providers;
pub mod scoring;
pub mod seed;
pub mod sender;
pub mod store;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use discovery::{Candidate, Discovery, DiscoveryReport};
pub use error::{OutreachError, Result};
pub use generator::{GenerateRequest, GeneratedMessage, MessageGenerator};
pub use providers::{ChannelSearch, MailDelivery, TextGenerator};
pub use scoring::{BrandFitScorer, RandomFitScorer};
pub use sender::{OutreachSender, SendReceipt};
