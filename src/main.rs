mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod utils;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};
use config::rate_limit::RateLimitConfig;
use serde_json::json;
use services::banlist::BanListService;
use services::credential::CredentialValidator;
use services::notify::NotificationService;
use services::store::ReportStore;
use std::env;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        // Auth routes
        crate::handlers::auth::login,
        // Report routes
        crate::handlers::report::submit_report,
        crate::handlers::report::list_reports,
        crate::handlers::report::action_report,
    ),
    components(
        schemas(
            crate::error::AppError,
            // Auth
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::LoginResponse,
            // Reports
            crate::handlers::report::SubmitReportRequest,
            crate::handlers::report::SubmitReportResponse,
            crate::handlers::report::ActionReportRequest,
            crate::handlers::report::ActionReportResponse,
            crate::handlers::report::ReportQueueResponse,
            crate::models::Report,
            crate::models::ReportStatus,
        )
    ),
    tags(
        (name = "auth", description = "Moderator authentication"),
        (name = "reports", description = "Report submission and moderation"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modqueue=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Report Moderation API v{}...", env!("CARGO_PKG_VERSION"));

    // State is in-memory only; a restart begins with empty collections.
    let store = ReportStore::new();

    let credentials = CredentialValidator::from_env();
    if credentials.is_configured() {
        tracing::info!(
            "{} moderator credential hash(es) loaded",
            credentials.hash_count()
        );
    } else {
        tracing::warn!("No moderator credential hashes configured, sign-in will always fail");
    }

    let notifier = NotificationService::from_env();
    if !notifier.is_configured() {
        tracing::warn!("No webhook URLs configured, notifications will be skipped");
    }

    let ban_list = BanListService::from_env();
    let rate_limit = RateLimitConfig::from_env();

    let app = create_app(rate_limit)
        .layer(Extension(store))
        .layer(Extension(credentials))
        .layer(Extension(notifier))
        .layer(Extension(ban_list));

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins_str == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn create_app(rate_limit: RateLimitConfig) -> Router {
    Router::new()
        .route("/", get(health_check))
        .merge(routes::create_routes(rate_limit))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value)
    )
)]
async fn health_check(Extension(store): Extension<ReportStore>) -> impl IntoResponse {
    let (pending, actioned) = store.counts();

    Json(json!({
        "status": "ok",
        "service": "Report Moderation API",
        "version": env!("CARGO_PKG_VERSION"),
        "pending": pending,
        "actioned": actioned,
    }))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
