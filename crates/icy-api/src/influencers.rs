use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use icy_db::InfluencerFilter;
use icy_db::queries::MAX_INFLUENCER_LIMIT;
use icy_outreach::store::blocking;
use icy_types::api::{BrandFitRequest, BrandFitResponse, InfluencerQuery};
use icy_types::{FollowerBucket, Influencer, OutreachMessage, Platform};

use crate::error::{ApiError, ApiJson};
use crate::validate::optional;
use crate::AppState;

const DEFAULT_LIMIT: u32 = 50;

fn to_filter(query: InfluencerQuery) -> Result<InfluencerFilter, ApiError> {
    let platform = optional(query.platform)
        .map(|p| p.parse::<Platform>())
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let (min_followers, max_followers) = match optional(query.followers) {
        Some(bucket) => {
            let (min, max) = bucket
                .parse::<FollowerBucket>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?
                .range();
            (Some(min), max)
        }
        None => (None, None),
    };

    Ok(InfluencerFilter {
        category: optional(query.category),
        platform,
        min_followers,
        max_followers,
        limit: query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_INFLUENCER_LIMIT),
    })
}

/// GET /api/influencers
pub async fn list_influencers(
    State(state): State<AppState>,
    Query(query): Query<InfluencerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = to_filter(query)?;
    let influencers = blocking(&state.db, move |db| {
        db.list_influencers(&filter)?
            .into_iter()
            .map(|row| row.into_model())
            .collect::<anyhow::Result<Vec<Influencer>>>()
    })
    .await?;

    Ok(Json(influencers))
}

/// GET /api/influencers/{id}
pub async fn get_influencer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let influencer = blocking(&state.db, move |db| db.get_influencer(&id)?.map(|r| r.into_model()).transpose())
        .await?
        .ok_or(ApiError::NotFound("Influencer"))?;

    Ok(Json(influencer))
}

/// GET /api/influencers/{id}/messages — newest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = blocking(&state.db, move |db| {
        if db.get_influencer(&id)?.is_none() {
            return Ok(None);
        }
        db.list_messages_by_influencer(&id)?
            .into_iter()
            .map(|row| row.into_model())
            .collect::<anyhow::Result<Vec<OutreachMessage>>>()
            .map(Some)
    })
    .await?
    .ok_or(ApiError::NotFound("Influencer"))?;

    Ok(Json(messages))
}

/// POST /api/influencers/{id}/brand-fit
pub async fn score_brand_fit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<BrandFitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let description = optional(req.brand_description);
    let score = state.generator.score_brand_fit(id, description.as_deref()).await?;

    Ok(Json(BrandFitResponse {
        influencer_id: id,
        brand_fit_score: score,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use icy_db::NewInfluencer;
    use icy_outreach::seed::{demo_influencers, fallback_influencers};
    use icy_outreach::testing::FakeLlm;
    use serde_json::json;

    use crate::test_support::{Providers, TestApp, app, app_with};

    fn seed(app: &TestApp) {
        let mut all: Vec<NewInfluencer> = fallback_influencers("tech");
        all.extend(fallback_influencers("beauty"));
        all.extend(fallback_influencers("fitness"));
        for influencer in &all {
            app.db().insert_influencer_if_new(influencer).unwrap();
        }
    }

    fn seed_many(app: &TestApp, count: usize) {
        let template = demo_influencers().remove(0);
        for i in 0..count {
            let influencer = NewInfluencer {
                name: format!("Creator {i}"),
                channel_id: None,
                ..template.clone()
            };
            app.db().insert_influencer_if_new(&influencer).unwrap().unwrap();
        }
    }

    #[tokio::test]
    async fn test_list_sorted_by_followers() {
        let app = app();
        seed(&app);

        let (status, body) = app.call("GET", "/api/influencers", None).await;
        assert_eq!(status, StatusCode::OK);
        let followers: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["followers"].as_i64().unwrap())
            .collect();
        assert_eq!(followers.len(), 9);
        assert!(followers.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_list_filters_and_limit() {
        let app = app();
        seed(&app);

        let (_, body) = app.call("GET", "/api/influencers?category=tech&limit=2", None).await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|i| i["category"] == "tech"));

        let (_, body) = app.call("GET", "/api/influencers?followers=100k-1m", None).await;
        for i in body.as_array().unwrap() {
            let f = i["followers"].as_i64().unwrap();
            assert!((100_000..1_000_000).contains(&f));
        }
    }

    #[tokio::test]
    async fn test_list_defaults_to_fifty() {
        let app = app();
        seed_many(&app, 60);

        let (status, body) = app.call("GET", "/api/influencers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_list_limit_is_capped() {
        let app = app();
        seed_many(&app, 210);

        let (_, body) = app.call("GET", "/api/influencers?limit=500", None).await;
        assert_eq!(body.as_array().unwrap().len(), 200);

        let (_, body) = app.call("GET", "/api/influencers?limit=0", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_bucket_and_platform() {
        let app = app();
        let (status, body) = app.call("GET", "/api/influencers?followers=lots", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown follower range 'lots'");

        let (status, _) = app.call("GET", "/api/influencers?platform=myspace", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_influencer_is_404() {
        let app = app();
        let uri = format!("/api/influencers/{}", uuid::Uuid::new_v4());
        let (status, body) = app.call("GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Influencer not found");
    }

    #[tokio::test]
    async fn test_get_influencer_camel_case() {
        let app = app();
        let row = app.db().insert_influencer_if_new(&demo_influencers()[0]).unwrap().unwrap();

        let (status, body) = app.call("GET", &format!("/api/influencers/{}", row.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Alex Chen");
        assert_eq!(body["brandFitScore"], 87);
        assert_eq!(body["recentContent"][0], "AI innovations");
    }

    #[tokio::test]
    async fn test_brand_fit_endpoint_stores_score() {
        let app = app_with(Providers {
            llm: FakeLlm::replying(vec![Ok("91")]),
            ..Default::default()
        });
        let row = app.db().insert_influencer_if_new(&demo_influencers()[2]).unwrap().unwrap();

        let uri = format!("/api/influencers/{}/brand-fit", row.id);
        let (status, body) = app
            .call("POST", &uri, Some(json!({ "brandDescription": "Protein bars" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["brandFitScore"], 91);
        assert!(app.llm.prompts()[0].contains("Brand: Protein bars"));
    }
}
