//! Identity-provider abstraction.
//!
//! The gateway never owns credentials or sessions; every operation is a
//! single call against the external identity provider. The [`IdentityProvider`]
//! trait is the seam between the HTTP handlers and the concrete client so
//! handlers can be exercised against a stub in tests.

pub mod gotrue;
pub use self::gotrue::GoTrueClient;

use reqwest::StatusCode;
use serde_json::Value;
use std::{future::Future, pin::Pin, sync::Arc};
use thiserror::Error;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Shared handle to the provider client, constructed once at startup.
pub type SharedProvider = Arc<dyn IdentityProvider>;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider processed the call and refused it. The message is the
    /// provider's own text and is surfaced to callers verbatim.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The provider could not be reached or returned an unreadable response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Sign-up input: credentials plus the profile metadata attached to the new
/// identity.
#[derive(Debug)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Provider-issued identity and token pair, both opaque to the gateway.
#[derive(Debug)]
pub struct AuthSession {
    pub user: Value,
    pub session: Value,
}

pub trait IdentityProvider: Send + Sync {
    /// Create a new identity and return its profile and session.
    fn sign_up(&self, signup: SignUp) -> BoxFuture<'_, Result<AuthSession, ProviderError>>;

    /// Password-grant sign-in.
    fn sign_in(&self, credentials: Credentials)
        -> BoxFuture<'_, Result<AuthSession, ProviderError>>;

    /// Invalidate the session bound to `access_token`. With no token there is
    /// no session to bind and the call succeeds without touching the provider.
    fn sign_out<'a>(
        &'a self,
        access_token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), ProviderError>>;

    /// Ask the provider to dispatch a password-reset notification.
    fn send_password_reset<'a>(&'a self, email: &'a str)
        -> BoxFuture<'a, Result<(), ProviderError>>;

    /// Set a new password on the identity bound to `access_token`.
    fn update_password<'a>(
        &'a self,
        access_token: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<(), ProviderError>>;

    /// Resolve the user identity behind `access_token`.
    fn user_for_token<'a>(
        &'a self,
        access_token: &'a str,
    ) -> BoxFuture<'a, Result<Value, ProviderError>>;
}

/// Pull the human-readable message out of a provider error body.
///
/// The provider is not consistent about the field name across endpoints, so
/// the known spellings are tried in order.
pub(crate) fn provider_error_message(json_response: &Value, status: StatusCode) -> String {
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| json_response.get(key).and_then(Value::as_str))
        .map_or_else(|| format!("Provider returned {status}"), str::to_string)
}

/// Separate the provider's `user` object from the rest of the token payload.
///
/// Both halves stay opaque; the gateway only re-arranges them into the
/// `{user, session}` response shape.
#[must_use]
pub(crate) fn split_session(mut body: Value) -> AuthSession {
    let user = body
        .as_object_mut()
        .and_then(|object| object.remove("user"))
        .unwrap_or(Value::Null);

    AuthSession {
        user,
        session: body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_prefers_msg_field() {
        let body = json!({"msg": "User already registered", "error": "conflict"});
        let message = provider_error_message(&body, StatusCode::BAD_REQUEST);
        assert_eq!(message, "User already registered");
    }

    #[test]
    fn error_message_falls_back_through_known_fields() {
        let body = json!({"error_description": "Invalid login credentials"});
        let message = provider_error_message(&body, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Invalid login credentials");

        let body = json!({"error": "invalid_grant"});
        let message = provider_error_message(&body, StatusCode::BAD_REQUEST);
        assert_eq!(message, "invalid_grant");
    }

    #[test]
    fn error_message_defaults_to_status() {
        let message = provider_error_message(&Value::Null, StatusCode::BAD_GATEWAY);
        assert_eq!(message, "Provider returned 502 Bad Gateway");
    }

    #[test]
    fn split_session_separates_user_from_tokens() {
        let body = json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "user": {"id": "user-1", "email": "a@b.com"},
        });

        let auth = split_session(body);
        assert_eq!(auth.user["id"], "user-1");
        assert_eq!(auth.session["access_token"], "at");
        assert!(auth.session.get("user").is_none());
    }

    #[test]
    fn split_session_without_user_yields_null() {
        let auth = split_session(json!({"access_token": "at"}));
        assert!(auth.user.is_null());
        assert_eq!(auth.session["access_token"], "at");
    }

    #[test]
    fn rejected_error_displays_provider_message() {
        let error = ProviderError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: "Password should be at least 6 characters".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Password should be at least 6 characters"
        );
    }
}
