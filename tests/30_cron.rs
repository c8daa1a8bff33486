mod common;

use anyhow::Result;
use blog_cms_rust::settings::{Setting, SettingsStore};
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn cron_requires_shared_secret() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = common::client();

    let res = client.post(server.url("/api/cron/settings/seed")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(server.url("/api/cron/settings/seed"))
        .bearer_auth("wrong-secret")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Unauthorized");

    assert!(server.store.fetch_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn cron_seed_fills_missing_defaults_only() -> Result<()> {
    let server = common::spawn_server_with(vec![Setting::new("siteTitle", "Field Notes", "general")]).await?;
    let client = common::client();

    let body = client
        .post(server.url("/api/cron/settings/seed"))
        .bearer_auth(common::CRON_SECRET)
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"]["inserted"], 5);
    assert_eq!(body["data"]["total"], 6);

    // Second run is a no-op
    let body = client
        .post(server.url("/api/cron/settings/seed"))
        .bearer_auth(common::CRON_SECRET)
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"]["inserted"], 0);

    assert_eq!(server.store.get("siteTitle").await?.unwrap().value, "Field Notes");
    Ok(())
}

#[tokio::test]
async fn concurrent_cron_seeds_do_not_duplicate() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = common::client();

    let send = || {
        client
            .post(server.url("/api/cron/settings/seed"))
            .bearer_auth(common::CRON_SECRET)
            .send()
    };
    let (a, b) = tokio::join!(send(), send());

    let a = a?.json::<Value>().await?;
    let b = b?.json::<Value>().await?;
    let inserted = a["data"]["inserted"].as_u64().unwrap() + b["data"]["inserted"].as_u64().unwrap();

    assert_eq!(inserted, 6);
    assert_eq!(server.store.fetch_all().await?.len(), 6);
    Ok(())
}

#[tokio::test]
async fn cron_health() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = common::client()
        .get(server.url("/api/cron/health"))
        .bearer_auth(common::CRON_SECRET)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
