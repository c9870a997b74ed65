use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use icy_outreach::OutreachError;
use icy_types::api::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Outreach(#[from] OutreachError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Outreach(e) => match e {
                OutreachError::NotFound(_) => StatusCode::NOT_FOUND,
                OutreachError::Validation(_) => StatusCode::BAD_REQUEST,
                OutreachError::NotWired(_) => StatusCode::NOT_IMPLEMENTED,
                OutreachError::Provider(_) | OutreachError::Delivery(_) | OutreachError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Storage details stay in the log
            Self::Outreach(OutreachError::Store(e)) => {
                error!(error = %e, "Storage failure");
                "Internal server error".to_string()
            }
            other => {
                if status.is_server_error() {
                    error!(error = %other, "Request failed");
                }
                other.to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// `Json` whose rejections use the `{"error": ...}` body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
