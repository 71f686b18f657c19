use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::error::Error;

/// JSON error envelope: `{error, details?}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
            details: None,
        }
    }

    /// Maps a collaborator failure. Validation errors keep their message and
    /// become 400; everything else is a 500 under `summary`.
    pub fn from_error(summary: &str, err: Error) -> Self {
        match err {
            Error::Validation(message) => Self::bad_request(message),
            other => {
                error!("{} {}", summary, other);
                let details = match other {
                    Error::UpstreamUnavailable { message, .. } => message,
                    Error::SourceUnavailable(message) | Error::ClassificationFailure(message) => {
                        message
                    }
                    Error::Validation(message) => message,
                };
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: summary.to_string(),
                    details: Some(details),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
