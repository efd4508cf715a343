use crate::{
    api::{error::ApiError, handlers::bearer_token},
    provider::SharedProvider,
};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UpdatePasswordRequest {
    password: Option<String>,
}

type UpdatePasswordResponse = Result<(StatusCode, Json<Value>), ApiError>;

#[utoipa::path(
    post,
    path = "/update-password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated successfully", content_type = "application/json"),
        (status = 400, description = "Missing field or provider rejection"),
        (status = 401, description = "Authorization header required"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "auth",
)]
#[instrument(skip(provider, headers, payload))]
pub async fn update_password(
    Extension(provider): Extension<SharedProvider>,
    headers: HeaderMap,
    payload: Result<Json<UpdatePasswordRequest>, JsonRejection>,
) -> UpdatePasswordResponse {
    // The bearer check comes first: without a session there is nothing to
    // update, whatever the body holds.
    let Some(token) = bearer_token(&headers) else {
        return Err(ApiError::Unauthorized);
    };

    let Json(request) = payload.map_err(|err| ApiError::Unhandled(err.body_text()))?;

    let Some(password) = request.password else {
        return Err(ApiError::MissingField("Password is required"));
    };

    provider.update_password(&token, &password).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Password updated successfully" })),
    ))
}
