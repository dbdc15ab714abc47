use crate::config::rate_limit::RateLimitConfig;
use crate::handlers;
use axum::{routing, Router};
use std::time::Duration;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

pub fn create_routes(rate_limit: RateLimitConfig) -> Router {
    Router::new().nest("/api/v1", api_routes(rate_limit))
}

fn api_routes(rate_limit: RateLimitConfig) -> Router {
    submission_routes(&rate_limit).merge(moderation_routes())
}

/// The public submission endpoint, throttled per source address.
fn submission_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new().route("/reports", routing::post(handlers::report::submit_report));
    with_optional_rate_limit(router, config)
}

/// Moderator surface: sign-in plus queue reads and actions. Only sign-in
/// checks a credential; the data endpoints are unauthenticated.
fn moderation_routes() -> Router {
    Router::new()
        .route("/auth/login", routing::post(handlers::auth::login))
        .route("/reports", routing::get(handlers::report::list_reports))
        .route(
            "/reports/action",
            routing::post(handlers::report::action_report),
        )
}

fn with_optional_rate_limit(router: Router, config: &RateLimitConfig) -> Router {
    if !config.enabled {
        return router;
    }

    // Burst covers the full per-window allowance; the replenish period
    // spreads it across the window, so request max+1 inside one window is
    // rejected with 429.
    let period = Duration::from_secs(config.window_seconds.max(1)) / config.max_requests.max(1);
    let governor_conf = GovernorConfigBuilder::default()
        .period(period)
        .burst_size(config.max_requests.max(1))
        .finish()
        .expect("Invalid rate limit configuration");

    router.layer(GovernorLayer::new(governor_conf))
}
