use std::sync::Arc;
use std::time::Duration;

use icy_clients::ChannelDetails;
use icy_db::{Database, NewInfluencer};
use icy_types::{Influencer, Platform};
use tracing::{debug, info, warn};

use crate::classify::{classify_category, content_themes, derive_handle, estimate_avg_views, search_phrases};
use crate::error::{OutreachError, Result};
use crate::providers::ChannelSearch;
use crate::scoring::{BrandFitScorer, RandomFitScorer, ScoringInput};
use crate::seed;
use crate::store::blocking;

/// Channels below this subscriber count are never considered.
pub const MIN_FOLLOWERS: u64 = 1_000;

pub const MAX_RESULTS_PER_QUERY: u32 = 50;

/// Cooperative pause between phrase queries to stay under provider rate limits.
pub const PHRASE_PAUSE: Duration = Duration::from_millis(100);

/// A discovery result that has not been deduplicated or stored yet.
pub type Candidate = NewInfluencer;

/// Outcome of a category discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub phrases: usize,
    pub failed_phrases: usize,
    pub inserted: usize,
}

impl DiscoveryReport {
    /// Every phrase query errored, i.e. the provider is effectively down.
    pub fn all_failed(&self) -> bool {
        self.phrases > 0 && self.failed_phrases == self.phrases
    }
}

/// Finds influencers through the search provider and stores the new ones.
pub struct Discovery {
    search: Arc<dyn ChannelSearch>,
    db: Arc<Database>,
    scorer: Arc<dyn BrandFitScorer>,
    phrase_pause: Duration,
}

impl Discovery {
    pub fn new(search: Arc<dyn ChannelSearch>, db: Arc<Database>) -> Self {
        Self {
            search,
            db,
            scorer: Arc::new(RandomFitScorer),
            phrase_pause: PHRASE_PAUSE,
        }
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn BrandFitScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_phrase_pause(mut self, pause: Duration) -> Self {
        self.phrase_pause = pause;
        self
    }

    /// Search once, fetch statistics for the whole batch, and map every
    /// channel above the follower floor into a candidate.
    pub async fn search_by_query(&self, query: &str, max_results: u32) -> Result<Vec<Candidate>> {
        let max_results = max_results.clamp(1, MAX_RESULTS_PER_QUERY);

        let ids = self
            .search
            .search_channel_ids(query, max_results)
            .await
            .map_err(|e| OutreachError::Provider(format!("search '{}': {}", query, e)))?;
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let channels = self
            .search
            .channel_details(&ids)
            .await
            .map_err(|e| OutreachError::Provider(format!("channel details: {}", e)))?;

        let found = channels.len();
        let candidates: Vec<Candidate> = channels
            .into_iter()
            .filter(|c| c.subscriber_count >= MIN_FOLLOWERS)
            .map(|c| self.to_candidate(c))
            .collect();

        debug!(query, found, kept = candidates.len(), "Search mapped to candidates");
        Ok(candidates)
    }

    fn to_candidate(&self, channel: ChannelDetails) -> Candidate {
        let followers = i64::try_from(channel.subscriber_count).unwrap_or(i64::MAX);
        let category = classify_category(&channel.title, &channel.description);
        let brand_fit_score = self
            .scorer
            .score(&ScoringInput {
                name: &channel.title,
                category,
                followers,
            })
            .clamp(1, 100);

        NewInfluencer {
            handle: derive_handle(channel.custom_url.as_deref(), &channel.title),
            name: channel.title,
            platform: Platform::Youtube,
            category: category.to_string(),
            followers,
            avg_views: Some(estimate_avg_views(followers)),
            email: None,
            avatar: channel.thumbnail,
            channel_id: Some(channel.id),
            brand_fit_score: Some(brand_fit_score),
            recent_content: content_themes(category),
        }
    }

    /// Store each candidate whose dedup key is unused, one at a time.
    /// Returns only the rows this call created. A failing insert is logged
    /// and skipped.
    pub async fn save_candidates(&self, candidates: Vec<Candidate>) -> Vec<Influencer> {
        let mut saved = Vec::new();

        for candidate in candidates {
            let name = candidate.name.clone();
            match blocking(&self.db, move |db| insert_unless_known(db, &candidate)).await {
                Ok(Some(influencer)) => saved.push(influencer),
                Ok(None) => debug!(name = %name, "Influencer already known, skipping"),
                Err(e) => warn!(name = %name, error = %e, "Failed to save influencer"),
            }
        }

        saved
    }

    /// Expand `category` into its search phrases and store what they find.
    /// A failing phrase is logged and skipped; the run never aborts.
    pub async fn discover_by_category(&self, category: &str, target_count: u32) -> DiscoveryReport {
        let phrases = search_phrases(category);
        let per_phrase = target_count.div_ceil(phrases.len() as u32);
        let mut report = DiscoveryReport {
            phrases: phrases.len(),
            ..Default::default()
        };

        info!(category, target_count, per_phrase, "Starting influencer discovery");

        for phrase in phrases {
            match self.search_by_query(phrase, per_phrase).await {
                Ok(candidates) => {
                    report.inserted += self.save_candidates(candidates).await.len();
                }
                Err(e) => {
                    report.failed_phrases += 1;
                    warn!(phrase, error = %e, "Discovery phrase failed, continuing");
                }
            }

            tokio::time::sleep(self.phrase_pause).await;
        }

        info!(
            category,
            inserted = report.inserted,
            failed_phrases = report.failed_phrases,
            "Influencer discovery finished"
        );
        report
    }

    /// Insert the hand-authored seeds for `category`, skipping known names.
    /// Categories without a seed list insert nothing.
    pub async fn seed_fallback(&self, category: &str) -> Vec<Influencer> {
        let seeds = seed::fallback_influencers(category);
        if seeds.is_empty() {
            warn!(category, "No fallback seeds for category");
            return vec![];
        }

        let saved = self.save_candidates(seeds).await;
        info!(category, inserted = saved.len(), "Inserted fallback influencers");
        saved
    }

    /// Insert the fixed demo set. Re-running inserts nothing new.
    pub async fn populate_demo(&self) -> Vec<Influencer> {
        let saved = self.save_candidates(seed::demo_influencers()).await;
        info!(inserted = saved.len(), "Populated demo influencers");
        saved
    }
}

fn insert_unless_known(db: &Database, candidate: &NewInfluencer) -> anyhow::Result<Option<Influencer>> {
    if db
        .find_influencer_by_dedup_key(candidate.channel_id.as_deref(), &candidate.name)?
        .is_some()
    {
        return Ok(None);
    }
    // The unique indexes still arbitrate between concurrent discoveries.
    db.insert_influencer_if_new(candidate)?
        .map(|row| row.into_model())
        .transpose()
}
