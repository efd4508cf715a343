pub mod error;
mod handlers;

#[allow(unused_imports)]
use crate::{
    api::handlers::{
        health, health::__path_health, login, login::__path_login, logout, logout::__path_logout,
        register, register::__path_register, reset_password,
        reset_password::__path_reset_password, service_info, service_info::__path_service_info,
        update_password, update_password::__path_update_password, verify_session,
        verify_session::__path_verify_session,
    },
    provider::SharedProvider,
};
use anyhow::Result;
use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request},
    routing::{get, post},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        service_info,
        register,
        login,
        logout,
        reset_password,
        update_password,
        verify_session,
        health
    ),
    components(schemas(
        register::RegisterRequest,
        login::LoginRequest,
        reset_password::ResetPasswordRequest,
        update_password::UpdatePasswordRequest,
        health::Health
    )),
    tags(
        (name = "auth", description = "Authentication gateway API"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the gateway router.
///
/// The six operations live under `base_path`; `/health` and the structured
/// 404 fallback sit outside it. Every `MethodRouter` carries a fallback so a
/// recognized path hit with the wrong verb answers 405 instead of the bare
/// default, and OPTIONS preflights are answered by the CORS layer before any
/// path logic runs.
pub fn router(provider: SharedProvider, base_path: &str) -> Router {
    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    let operations = Router::new()
        .route(
            "/",
            get(handlers::service_info).fallback(handlers::method_not_allowed),
        )
        .route(
            "/register",
            post(handlers::register).fallback(handlers::method_not_allowed),
        )
        .route(
            "/login",
            post(handlers::login).fallback(handlers::method_not_allowed),
        )
        .route(
            "/logout",
            post(handlers::logout).fallback(handlers::method_not_allowed),
        )
        .route(
            "/reset-password",
            post(handlers::reset_password).fallback(handlers::method_not_allowed),
        )
        .route(
            "/update-password",
            post(handlers::update_password).fallback(handlers::method_not_allowed),
        )
        .route(
            "/verify-session",
            get(handlers::verify_session).fallback(handlers::method_not_allowed),
        );

    let app = if base_path == "/" {
        Router::new().merge(operations)
    } else {
        Router::new().nest(base_path, operations)
    };

    app.route("/health", get(handlers::health).options(handlers::health))
        .fallback(handlers::unknown_route)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_request: &Request<Body>| {
                        HeaderValue::from_str(Ulid::new().to_string().as_str()).ok()
                    },
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(provider)),
        )
}

/// Bind and serve until SIGINT.
/// # Errors
/// Returns an error if the server fails to start
pub async fn serve(port: u16, base_path: &str, provider: SharedProvider) -> Result<()> {
    let app = router(provider, base_path);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}
