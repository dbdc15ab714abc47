#![allow(dead_code)]

use modqueue::config::auth::ModeratorAuthConfig;
use modqueue::config::rate_limit::RateLimitConfig;
use modqueue::config::webhook::WebhookConfig;
use modqueue::services::banlist::BanListService;
use modqueue::services::credential::CredentialValidator;
use modqueue::services::notify::NotificationService;
use modqueue::services::store::ReportStore;
use reqwest::Client;
use serde_json::Value;
use std::net::SocketAddr;

pub struct TestApp {
    pub addr: String,
    pub client: Client,
    pub store: ReportStore,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.addr, path)
    }
}

pub struct TestAppConfig {
    pub rate_limit: RateLimitConfig,
    pub credentials: ModeratorAuthConfig,
    pub webhooks: WebhookConfig,
}

impl Default for TestAppConfig {
    fn default() -> Self {
        Self {
            // Off by default so unrelated tests never trip the limiter.
            rate_limit: RateLimitConfig {
                enabled: false,
                ..RateLimitConfig::default()
            },
            credentials: ModeratorAuthConfig {
                password_hashes: Vec::new(),
                bcrypt_cost: 4,
            },
            webhooks: WebhookConfig::default(),
        }
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestAppConfig::default()).await
}

pub async fn spawn_app_with(config: TestAppConfig) -> TestApp {
    let store = ReportStore::new();
    let credentials = CredentialValidator::new(config.credentials);
    let notifier = NotificationService::new(config.webhooks);
    let ban_list = BanListService::disabled();

    let app = axum::Router::new()
        .merge(modqueue::routes::create_routes(config.rate_limit))
        .layer(axum::extract::Extension(store.clone()))
        .layer(axum::extract::Extension(credentials))
        .layer(axum::extract::Extension(notifier))
        .layer(axum::extract::Extension(ban_list));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        client: Client::new(),
        store,
    }
}

/// Submit a report and return its id.
pub async fn submit_report(app: &TestApp, target: i64, reporter: i64) -> String {
    let resp = app
        .client
        .post(app.url("/reports"))
        .json(&serde_json::json!({
            "target": target,
            "reporter": reporter,
            "context": "spam",
            "reason": "scamming"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    body["report_id"].as_str().unwrap().to_string()
}

pub async fn action_report(app: &TestApp, report_id: &str, action: &str) -> reqwest::Response {
    app.client
        .post(app.url("/reports/action"))
        .json(&serde_json::json!({
            "reportId": report_id,
            "action": action
        }))
        .send()
        .await
        .unwrap()
}
