//! Case simulator web: error types.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use casesim_core::error::CaseError;
use casesim_core::settings::ConfigError;
use thiserror::Error;

use crate::render;

/// Startup and runtime errors for the web server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// HTTP-layer wrapper around `CaseError` that renders an error page.
#[derive(Debug)]
pub struct ApiError(pub CaseError);

impl From<CaseError> for ApiError {
    fn from(err: CaseError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and machine-readable error code for the wrapped error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            CaseError::CaseNotFound(_) => (StatusCode::NOT_FOUND, "case_not_found"),
            CaseError::MalformedCase(_) => (StatusCode::UNPROCESSABLE_ENTITY, "malformed_case"),
            CaseError::InvalidChoice { .. } => (StatusCode::BAD_REQUEST, "invalid_choice"),
            CaseError::OutOfRange { .. } => (StatusCode::BAD_REQUEST, "out_of_range"),
            CaseError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let page = render::error_page(status, error_code, &self.0.to_string());
        (status, Html(page)).into_response()
    }
}
