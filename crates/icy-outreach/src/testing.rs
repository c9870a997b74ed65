//! In-memory provider doubles for exercising the workflows without network access.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use icy_clients::{ChannelDetails, Email};

use crate::providers::{ChannelSearch, MailDelivery, TextGenerator};

pub fn channel(id: &str, title: &str, description: &str, subscribers: u64) -> ChannelDetails {
    ChannelDetails {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        custom_url: None,
        thumbnail: Some(format!("https://img.example/{id}.jpg")),
        subscriber_count: subscribers,
    }
}

/// Scripted channel search keyed by query text.
#[derive(Default)]
pub struct FakeSearch {
    results: HashMap<String, Vec<ChannelDetails>>,
    failing: HashSet<String>,
    fail_all: bool,
    queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, channels: Vec<ChannelDetails>) -> Self {
        self.results.insert(query.to_string(), channels);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn unavailable() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Queries seen so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChannelSearch for FakeSearch {
    async fn search_channel_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        if self.fail_all || self.failing.contains(query) {
            return Err(anyhow!("search unavailable for '{query}'"));
        }
        Ok(self
            .results
            .get(query)
            .map(|channels| {
                channels
                    .iter()
                    .take(max_results as usize)
                    .map(|c| c.id.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn channel_details(&self, channel_ids: &[String]) -> Result<Vec<ChannelDetails>> {
        let mut seen = HashSet::new();
        Ok(self
            .results
            .values()
            .flatten()
            .filter(|c| channel_ids.contains(&c.id) && seen.insert(c.id.clone()))
            .cloned()
            .collect())
    }
}

/// Text generator that replays scripted replies and records every prompt.
pub struct FakeLlm {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn replying(replies: Vec<std::result::Result<&str, &str>>) -> Self {
        let replies = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for FakeLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let next = self
            .replies
            .lock()
            .map_err(|e| anyhow!("reply queue poisoned: {e}"))?
            .pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted reply left")),
        }
    }
}

/// Mail delivery that records accepted emails, or rejects everything.
#[derive(Default)]
pub struct FakeMail {
    reject: bool,
    delay: Duration,
    sent: Mutex<Vec<Email>>,
}

impl FakeMail {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    /// Hold each delivery open for `delay` before accepting it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MailDelivery for FakeMail {
    async fn deliver(&self, email: &Email) -> Result<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.reject {
            return Err(anyhow!("API error (status 401): bad key"));
        }
        self.sent
            .lock()
            .map_err(|e| anyhow!("sent log poisoned: {e}"))?
            .push(email.clone());
        Ok(())
    }
}
