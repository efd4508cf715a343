use crate::{
    api::{error::ApiError, handlers::bearer_token},
    provider::SharedProvider,
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

type LogoutResponse = Result<(StatusCode, Json<Value>), ApiError>;

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Logout successful", content_type = "application/json"),
        (status = 400, description = "Provider rejection"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "auth",
)]
#[instrument(skip(provider, headers))]
pub async fn logout(
    Extension(provider): Extension<SharedProvider>,
    headers: HeaderMap,
) -> LogoutResponse {
    // Sign-out is invoked unconditionally: with a bearer token it is bound
    // as the active session first, without one the call still succeeds.
    let token = bearer_token(&headers);

    provider.sign_out(token.as_deref()).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Logout successful" })),
    ))
}
