//! HTTP surface: JSON handlers over the outreach workflows and the record store.

pub mod brands;
pub mod demo;
pub mod discovery;
pub mod error;
pub mod influencers;
pub mod messages;
pub mod validate;

use std::sync::Arc;

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde_json::json;

use icy_db::Database;
use icy_outreach::{Discovery, MessageGenerator, OutreachSender};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub discovery: Discovery,
    pub generator: MessageGenerator,
    pub sender: OutreachSender,
}

/// All routes, with state applied. Middleware layers are added by the binary.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/influencers", get(influencers::list_influencers))
        .route("/influencers/{id}", get(influencers::get_influencer))
        .route("/influencers/{id}/messages", get(influencers::list_messages))
        .route("/influencers/{id}/brand-fit", post(influencers::score_brand_fit))
        .route("/generate-message", post(messages::generate_message))
        .route("/messages/{id}", patch(messages::edit_message))
        .route("/send-message", post(messages::send_message))
        .route("/messages/{id}/delivery-events", post(messages::delivery_event))
        .route("/discover-influencers", post(discovery::discover_influencers))
        .route("/search-youtube", post(discovery::search_youtube))
        .route("/brands", post(brands::create_brand))
        .route("/users/{id}/brands", get(brands::list_brands))
        .route("/campaigns", post(brands::create_campaign))
        .route("/users/{id}/campaigns", get(brands::list_campaigns))
        .route("/demo/create-user", post(demo::create_user))
        .route("/demo/populate-influencers", post(demo::populate_influencers));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
