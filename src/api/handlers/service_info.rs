use crate::api::handlers::AVAILABLE_ENDPOINTS;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service info and available endpoints", content_type = "application/json"),
    ),
    tag = "auth",
)]
#[instrument]
pub async fn service_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Portage auth gateway",
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::service_info;
    use anyhow::Result;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    #[tokio::test]
    async fn service_info_lists_all_operations() -> Result<()> {
        let response = service_info().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json: Value = serde_json::from_slice(&body)?;

        let endpoints = json["available_endpoints"]
            .as_array()
            .map(Vec::len)
            .unwrap_or_default();
        assert_eq!(endpoints, 6);
        assert!(json["message"].as_str().unwrap_or_default().contains("auth"));
        Ok(())
    }
}
