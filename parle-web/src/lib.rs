//! HTTP front end for the ParleGPT relay
//!
//! One JSON endpoint (`POST /chat`) over the shared [`PromptRelay`], plus the
//! static chat page served from `static/`. Stateless across requests; the
//! relay is the only shared state and is read-only after startup.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use parle_core::{PromptRelay, RelayError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Incoming chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Absent key is treated the same as an empty message
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Relay failure rendered as an HTTP response
pub struct ApiError(RelayError);

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RelayError::InvalidInput => StatusCode::BAD_REQUEST,
            RelayError::Unconfigured | RelayError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

async fn chat(
    State(relay): State<Arc<PromptRelay>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.unwrap_or_default();
    tracing::info!(message_length = message.len(), "Chat request received");

    let response = relay.relay(&message).await?;

    tracing::info!(response_length = response.len(), "Chat reply sent");
    Ok(Json(ChatResponse { response }))
}

/// Build the router. Shared between the binary and the handler tests.
pub fn app(relay: Arc<PromptRelay>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .fallback_service(ServeDir::new("static"))
        .with_state(relay)
}
