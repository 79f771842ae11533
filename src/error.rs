//! Error type shared by handlers, services and the request filter.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or bad credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but the role is not allowed on this route.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    /// Database or other infrastructure failure.
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Don't expose storage details to clients
        let message = match &self {
            Self::Storage(e) => {
                tracing::error!(error = %e, "request failed");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };
        (status, message).into_response()
    }
}
