//! Error classification for the HTTP surface
//!
//! Every handler failure funnels through [`ApiError`], which maps each
//! library error to a status code and a structured `{error, message}`
//! body. The mapping is exhaustive: no failure path leaves a response
//! unterminated.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use url2md::Error;

/// Structured error body: short category plus human-readable detail
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Handler-level error wrapping the library taxonomy
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category) = match &self.0 {
            Error::MissingUrl => (StatusCode::BAD_REQUEST, "URL is required"),
            Error::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid URL format"),
            // The upstream's own status is surfaced unchanged
            Error::UpstreamStatus { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Failed to fetch URL",
            ),
            Error::UnsupportedContentType(_) => {
                (StatusCode::BAD_REQUEST, "Unsupported content type")
            }
            Error::EmptyBody => (StatusCode::INTERNAL_SERVER_ERROR, "No content received"),
            Error::Conversion(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Conversion failed"),
            Error::Transport(_) | Error::ClientBuild(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        let message = match &self.0 {
            Error::Transport(_) | Error::ClientBuild(_) => {
                format!("An unexpected error occurred: {}", self.0)
            }
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(ErrorBody {
                error: category.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
