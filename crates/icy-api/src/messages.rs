use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use icy_outreach::{GenerateRequest, drafts};
use icy_types::api::{
    DeliveryEventRequest, GenerateMessageRequest, GenerateMessageResponse, SendMessageRequest,
    SendMessageResponse, UpdateMessageRequest,
};

use crate::AppState;
use crate::error::{ApiError, ApiJson};
use crate::validate::{email, optional};

/// POST /api/generate-message
pub async fn generate_message(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let generated = state
        .generator
        .generate(GenerateRequest {
            influencer_id: req.influencer_id,
            owner_id: req.user_id,
            brand_name: optional(req.brand_name),
            brand_description: optional(req.brand_description),
        })
        .await?;

    Ok(Json(GenerateMessageResponse {
        message_id: generated.message_id,
        subject: generated.subject,
        content: generated.content,
        influencer: generated.influencer,
    }))
}

/// PATCH /api/messages/{id} — edit a draft before sending.
pub async fn edit_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = drafts::edit_draft(&state.db, id, req.subject, req.content).await?;
    Ok(Json(message))
}

/// POST /api/send-message
pub async fn send_message(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let to = email("toEmail", &req.to_email)?;
    let from = optional(req.from_email).map(|f| email("fromEmail", &f)).transpose()?;

    let receipt = state.sender.send(req.message_id, &to, from.as_deref()).await?;

    let message = if receipt.already_sent {
        info!(message_id = %req.message_id, "Send requested for a message that was already sent");
        "Message was already sent"
    } else {
        "Message sent successfully"
    };

    Ok(Json(SendMessageResponse {
        success: true,
        message: message.to_string(),
        sent_to: receipt.sent_to,
    }))
}

/// POST /api/messages/{id}/delivery-events
pub async fn delivery_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<DeliveryEventRequest>,
) -> Result<StatusCode, ApiError> {
    state.sender.record_delivery_event(id, req.status).await?;
    Ok(StatusCode::ACCEPTED)
}
