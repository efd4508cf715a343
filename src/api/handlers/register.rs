use crate::{
    api::error::ApiError,
    provider::{SharedProvider, SignUp},
};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    email: Option<String>,
    password: Option<String>,
    full_name: Option<String>,
    phone: Option<String>,
}

type RegisterResponse = Result<(StatusCode, Json<Value>), ApiError>;

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration successful", content_type = "application/json"),
        (status = 400, description = "Missing field or provider rejection"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "auth",
)]
#[instrument(skip(provider, payload))]
pub async fn register(
    Extension(provider): Extension<SharedProvider>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> RegisterResponse {
    let Json(request) = payload.map_err(|err| ApiError::Unhandled(err.body_text()))?;

    let (email, password) = require_credentials(request.email, request.password)?;

    debug!("Registering {}", email);

    let auth = provider
        .sign_up(SignUp {
            email,
            password,
            full_name: request.full_name.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Registration successful",
            "user": auth.user,
            "session": auth.session,
        })),
    ))
}

/// Shared with `/login`: both operations require the same credential pair.
pub(super) fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String), ApiError> {
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(ApiError::MissingField("Email and password are required")),
    }
}
