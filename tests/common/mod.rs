#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blog_cms_rust::{
    app::app,
    auth::{generate_jwt, Claims, Role},
    config::AppConfig,
    settings::{MemorySettingsStore, Setting},
    state::AppState,
};
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-jwt-secret";
pub const CRON_SECRET: &str = "integration-cron-secret";

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemorySettingsStore>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = JWT_SECRET.to_string();
    config.security.cron_secret = CRON_SECRET.to_string();
    config
}

/// Start the app in this test's runtime on a free port, empty store
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(Vec::new()).await
}

pub async fn spawn_server_with(settings: Vec<Setting>) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(MemorySettingsStore::with_settings(settings));
    let router = app(AppState::new(store.clone(), test_config()));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer { base_url, store };
    wait_ready(&server, Duration::from_secs(5)).await?;
    Ok(server)
}

async fn wait_ready(server: &TestServer, timeout: Duration) -> Result<()> {
    let client = reqwest::Client::new();
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Ok(resp) = client.get(server.url("/health")).send().await {
            if resp.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    anyhow::bail!("server did not become ready on {} within {:?}", server.base_url, timeout)
}

/// Client that reports redirects instead of following them
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("reqwest client")
}

pub fn token(role: Role) -> String {
    generate_jwt(&Claims::new(Uuid::new_v4(), role, 1).expect("claims"), JWT_SECRET).expect("token")
}
