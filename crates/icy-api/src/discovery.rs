use axum::{Json, extract::State, response::IntoResponse};
use tracing::warn;

use icy_outreach::discovery::MAX_RESULTS_PER_QUERY;
use icy_types::api::{DiscoverRequest, DiscoverResponse, SavedInfluencersResponse, SearchRequest};

use crate::AppState;
use crate::error::{ApiError, ApiJson};
use crate::validate::required;

/// Five phrases at most, each capped at the per-query maximum.
const MAX_DISCOVER_COUNT: u32 = 5 * MAX_RESULTS_PER_QUERY;

/// POST /api/discover-influencers
///
/// Runs the whole discovery synchronously. When every phrase fails the
/// hand-authored seeds for the category are inserted instead.
pub async fn discover_influencers(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DiscoverRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category = required("category", req.category.as_deref())?.to_lowercase();
    if req.count == 0 {
        return Err(ApiError::BadRequest("count must be at least 1".into()));
    }
    let count = req.count.min(MAX_DISCOVER_COUNT);

    let report = state.discovery.discover_by_category(&category, count).await;

    let response = if report.all_failed() {
        warn!(category = %category, "Search provider unavailable, seeding fallback influencers");
        let seeded = state.discovery.seed_fallback(&category).await;
        DiscoverResponse {
            success: true,
            message: format!(
                "Search unavailable; added {} fallback {} influencers",
                seeded.len(),
                category
            ),
            inserted: seeded.len(),
            fallback_used: true,
        }
    } else {
        DiscoverResponse {
            success: true,
            message: format!("Discovered {} new {} influencers", report.inserted, category),
            inserted: report.inserted,
            fallback_used: false,
        }
    };

    Ok(Json(response))
}

/// POST /api/search-youtube
pub async fn search_youtube(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SearchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let query = required("query", req.query.as_deref())?;
    let max_results = req.max_results.clamp(1, MAX_RESULTS_PER_QUERY);

    let candidates = state.discovery.search_by_query(&query, max_results).await?;
    let saved = state.discovery.save_candidates(candidates).await;

    Ok(Json(SavedInfluencersResponse {
        success: true,
        message: format!("Found and saved {} new influencers", saved.len()),
        influencers: saved,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use icy_db::InfluencerFilter;
    use icy_outreach::testing::{FakeSearch, channel};
    use serde_json::json;

    use crate::test_support::{Providers, app, app_with};

    #[tokio::test]
    async fn test_discover_requires_category() {
        let (status, body) = app()
            .call("POST", "/api/discover-influencers", Some(json!({ "count": 5 })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "category is required");
    }

    #[tokio::test]
    async fn test_discover_inserts_from_search() {
        let search = FakeSearch::new()
            .with_results("cooking channel", vec![channel("UCc1", "Chef Lina", "recipes", 44_000)])
            .with_results("chef", vec![channel("UCc1", "Chef Lina", "recipes", 44_000)]);
        let app = app_with(Providers {
            search,
            ..Default::default()
        });

        let (status, body) = app
            .call("POST", "/api/discover-influencers", Some(json!({ "category": "food", "count": 10 })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inserted"], 1);
        assert_eq!(body["fallbackUsed"], false);
    }

    #[tokio::test]
    async fn test_unavailable_search_seeds_fallback_once() {
        let app = app_with(Providers {
            search: FakeSearch::unavailable(),
            ..Default::default()
        });
        let request = json!({ "category": "tech" });

        let (status, body) = app.call("POST", "/api/discover-influencers", Some(request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallbackUsed"], true);
        let first = body["inserted"].as_u64().unwrap();
        assert!(first >= 3);

        let (_, body) = app.call("POST", "/api/discover-influencers", Some(request)).await;
        assert_eq!(body["inserted"], 0);

        let stored = app.db().list_influencers(&InfluencerFilter::default()).unwrap();
        assert_eq!(stored.len() as u64, first);
    }

    #[tokio::test]
    async fn test_search_saves_only_new_influencers() {
        let search = FakeSearch::new().with_results(
            "mkbhd",
            vec![
                channel("UC1", "Tech Giant", "reviews", 18_000_000),
                channel("UC2", "Tiny", "reviews", 500),
            ],
        );
        let app = app_with(Providers {
            search,
            ..Default::default()
        });
        let request = json!({ "query": "mkbhd", "maxResults": 5 });

        let (status, body) = app.call("POST", "/api/search-youtube", Some(request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["influencers"].as_array().unwrap().len(), 1);
        assert_eq!(body["influencers"][0]["category"], "tech");

        let (_, body) = app.call("POST", "/api/search-youtube", Some(request)).await;
        assert_eq!(body["message"], "Found and saved 0 new influencers");
    }

    #[tokio::test]
    async fn test_search_provider_failure_is_500() {
        let app = app_with(Providers {
            search: FakeSearch::unavailable(),
            ..Default::default()
        });
        let (status, _) = app
            .call("POST", "/api/search-youtube", Some(json!({ "query": "anything" })))
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = app.call("POST", "/api/search-youtube", Some(json!({ "query": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
