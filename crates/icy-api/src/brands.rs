use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use icy_db::{Database, NewBrand, NewCampaign};
use icy_outreach::store::blocking;
use icy_types::api::{CreateBrandRequest, CreateCampaignRequest};
use icy_types::{Brand, Campaign, CampaignStatus};

use crate::error::{ApiError, ApiJson};
use crate::validate::{optional, required};
use crate::AppState;

async fn require_user(state: &AppState, user_id: Uuid) -> Result<(), ApiError> {
    let exists = blocking(&state.db, move |db| Ok(db.get_user(&user_id)?.is_some())).await?;
    if exists { Ok(()) } else { Err(ApiError::NotFound("User")) }
}

/// POST /api/brands
pub async fn create_brand(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateBrandRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let brand = NewBrand {
        name: required("name", Some(&req.name))?,
        description: optional(req.description),
        target_audience: optional(req.target_audience),
        website: optional(req.website),
        user_id: req.user_id,
    };
    require_user(&state, brand.user_id)
        .await
        .map_err(|_| ApiError::BadRequest(format!("Unknown user '{}'", brand.user_id)))?;

    let brand = blocking(&state.db, move |db| db.create_brand(&brand)?.into_model()).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// GET /api/users/{id}/brands
pub async fn list_brands(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_user(&state, user_id).await?;
    let brands = blocking(&state.db, move |db| {
        db.list_brands_by_user(&user_id)?
            .into_iter()
            .map(|row| row.into_model())
            .collect::<anyhow::Result<Vec<Brand>>>()
    })
    .await?;

    Ok(Json(brands))
}

/// POST /api/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateCampaignRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = match optional(req.status) {
        Some(s) => s.parse::<CampaignStatus>().map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => CampaignStatus::default(),
    };
    let campaign = NewCampaign {
        name: required("name", Some(&req.name))?,
        description: optional(req.description),
        status,
        brand_id: req.brand_id,
        user_id: req.user_id,
    };

    let created = blocking(&state.db, move |db| create_owned_campaign(db, &campaign)).await?;
    let campaign = created.ok_or_else(|| {
        ApiError::BadRequest("brandId must reference a brand owned by userId".into())
    })?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// `None` when the brand is missing or belongs to another user.
fn create_owned_campaign(db: &Database, campaign: &NewCampaign) -> anyhow::Result<Option<Campaign>> {
    let owned = db
        .get_brand(&campaign.brand_id)?
        .is_some_and(|brand| brand.user_id == campaign.user_id.to_string());
    if !owned {
        return Ok(None);
    }
    db.create_campaign(campaign)?.into_model().map(Some)
}

/// GET /api/users/{id}/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_user(&state, user_id).await?;
    let campaigns = blocking(&state.db, move |db| {
        db.list_campaigns_by_user(&user_id)?
            .into_iter()
            .map(|row| row.into_model())
            .collect::<anyhow::Result<Vec<Campaign>>>()
    })
    .await?;

    Ok(Json(campaigns))
}
