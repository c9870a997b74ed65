//! Demo-only endpoints for bootstrapping a local instance.

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{Json, extract::State, response::IntoResponse};
use rand_core::OsRng;
use tracing::info;

use icy_db::Database;
use icy_outreach::store::blocking;
use icy_types::User;
use icy_types::api::{DemoUserResponse, SavedInfluencersResponse};

use crate::error::ApiError;
use crate::AppState;

pub const DEMO_USERNAME: &str = "testuser";
const DEMO_PASSWORD: &str = "password";
const DEMO_EMAIL: &str = "test@example.com";

/// Returns the user and whether this call created it.
fn ensure_demo_user(db: &Database) -> anyhow::Result<(User, bool)> {
    if let Some(existing) = db.get_user_by_username(DEMO_USERNAME)? {
        return Ok((existing.into_model()?, false));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    let user = db.create_user(DEMO_USERNAME, &password_hash, Some(DEMO_EMAIL))?;
    Ok((user.into_model()?, true))
}

/// POST /api/demo/create-user
pub async fn create_user(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let (user, created) = blocking(&state.db, ensure_demo_user).await?;

    let message = if created {
        info!(user_id = %user.id, "Created demo user");
        "Test user created"
    } else {
        "Test user already exists"
    };

    Ok(Json(DemoUserResponse {
        success: true,
        message: message.to_string(),
        user_id: user.id,
    }))
}

/// POST /api/demo/populate-influencers
pub async fn populate_influencers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let influencers = state.discovery.populate_demo().await;

    Ok(Json(SavedInfluencersResponse {
        success: true,
        message: format!("Added {} demo influencers", influencers.len()),
        influencers,
    }))
}
