//! Error taxonomy for the gateway's HTTP surface.
//!
//! Every failure mode maps to a fixed status code and a `{"error": ...}`
//! JSON body. Provider messages are nested verbatim inside the contract,
//! never re-classified, so callers keep the provider's specific reason
//! (duplicate account, weak password, bad credentials, ...).

use crate::provider::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required body field is absent.
    #[error("{0}")]
    MissingField(&'static str),

    /// Known path, wrong HTTP verb.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A required `Authorization` bearer token is absent.
    #[error("Authorization header required")]
    Unauthorized,

    /// The token is present but the provider rejects it or returns no user.
    #[error("Invalid session")]
    InvalidSession,

    /// The provider processed the call and refused it; its message passes
    /// through untouched.
    #[error("{0}")]
    ProviderRejected(String),

    /// Anything not explicitly caught: malformed bodies, unreachable
    /// provider. The cause lands in a `details` field.
    #[error("Internal server error")]
    Unhandled(String),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::ProviderRejected(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized | Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(error: ProviderError) -> Self {
        match error {
            // The provider answered and said no: a 400 with its own words.
            ProviderError::Rejected { message, .. } => Self::ProviderRejected(message),
            // The provider never answered: nothing caught this, so a 500.
            ProviderError::Transport(err) => Self::Unhandled(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::Unhandled(details) => json!({
                "error": "Internal server error",
                "details": details,
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
