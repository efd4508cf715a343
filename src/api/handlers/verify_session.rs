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
use tracing::{error, instrument};

type VerifySessionResponse = Result<(StatusCode, Json<Value>), ApiError>;

#[utoipa::path(
    get,
    path = "/verify-session",
    responses(
        (status = 200, description = "Session is valid", content_type = "application/json"),
        (status = 401, description = "Missing authorization header or invalid session"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "auth",
)]
#[instrument(skip(provider, headers))]
pub async fn verify_session(
    Extension(provider): Extension<SharedProvider>,
    headers: HeaderMap,
) -> VerifySessionResponse {
    let Some(token) = bearer_token(&headers) else {
        return Err(ApiError::Unauthorized);
    };

    match provider.user_for_token(&token).await {
        Ok(user) => Ok((StatusCode::OK, Json(json!({ "valid": true, "user": user })))),
        Err(err) => {
            // Expired, revoked, garbage, or provider outage: the caller only
            // learns the session is not usable.
            error!("Session verification failed: {}", err);
            Err(ApiError::InvalidSession)
        }
    }
}
