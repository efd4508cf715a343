use crate::{
    api::{error::ApiError, handlers::register::require_credentials},
    provider::{Credentials, SharedProvider},
};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

type LoginResponse = Result<(StatusCode, Json<Value>), ApiError>;

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", content_type = "application/json"),
        (status = 400, description = "Missing field or provider rejection"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "auth",
)]
#[instrument(skip(provider, payload))]
pub async fn login(
    Extension(provider): Extension<SharedProvider>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> LoginResponse {
    let Json(request) = payload.map_err(|err| ApiError::Unhandled(err.body_text()))?;

    let (email, password) = require_credentials(request.email, request.password)?;

    // Whether a failure means "wrong password" or "no such user" is the
    // provider's call; its message passes through untouched.
    let auth = provider.sign_in(Credentials { email, password }).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "user": auth.user,
            "session": auth.session,
        })),
    ))
}
