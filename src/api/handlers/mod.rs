pub mod health;
pub use self::health::health;

pub mod service_info;
pub use self::service_info::service_info;

pub mod register;
pub use self::register::register;

pub mod login;
pub use self::login::login;

pub mod logout;
pub use self::logout::logout;

pub mod reset_password;
pub use self::reset_password::reset_password;

pub mod update_password;
pub use self::update_password::update_password;

pub mod verify_session;
pub use self::verify_session::verify_session;

// common functions for the handlers
use crate::api::error::ApiError;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// Operation paths relative to the service base path, advertised by the root
/// endpoint and by the 404 fallback.
pub const AVAILABLE_ENDPOINTS: [&str; 6] = [
    "/register",
    "/login",
    "/logout",
    "/reset-password",
    "/update-password",
    "/verify-session",
];

/// Extract the bearer token from the `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Fallback for recognized paths hit with the wrong verb.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for paths outside the recognized set.
pub async fn unknown_route(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "path": uri.path(),
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_strips_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn bearer_token_accepts_lowercase_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn bearer_token_missing_header_is_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn bearer_token_without_scheme_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc123"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn bearer_token_empty_token_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn unknown_route_reports_path_and_endpoints() {
        let uri: Uri = "https://gateway.tld/auth/nope".parse().expect("valid uri");
        let response = unknown_route(uri).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
