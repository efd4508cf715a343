use crate::{api::error::ApiError, provider::SharedProvider};
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
pub struct ResetPasswordRequest {
    email: Option<String>,
}

type ResetPasswordResponse = Result<(StatusCode, Json<Value>), ApiError>;

#[utoipa::path(
    post,
    path = "/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset email sent", content_type = "application/json"),
        (status = 400, description = "Missing field or provider rejection"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "auth",
)]
#[instrument(skip(provider, payload))]
pub async fn reset_password(
    Extension(provider): Extension<SharedProvider>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> ResetPasswordResponse {
    let Json(request) = payload.map_err(|err| ApiError::Unhandled(err.body_text()))?;

    let Some(email) = request.email else {
        return Err(ApiError::MissingField("Email is required"));
    };

    // The provider reports success whether or not the address is registered,
    // which is its own anti-enumeration behavior; inherited unchanged.
    provider.send_password_reset(&email).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Password reset email sent" })),
    ))
}
