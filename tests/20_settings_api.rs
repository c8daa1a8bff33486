mod common;

use anyhow::Result;
use blog_cms_rust::auth::Role;
use blog_cms_rust::settings::{Setting, SettingsStore};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn public_settings_seed_empty_store() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = common::client().get(server.url("/api/settings")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["siteTitle"], "My Blog");
    assert_eq!(body["data"]["commentsEnabled"], "true");
    assert_eq!(server.store.fetch_all().await?.len(), 6);
    Ok(())
}

#[tokio::test]
async fn public_settings_redact_sensitive_keys_even_for_admins() -> Result<()> {
    let server = common::spawn_server_with(vec![
        Setting::new("siteTitle", "Field Notes", "general"),
        Setting::new("stripe_secret", "sk_live_123", "payments"),
        Setting::new("privateAnalytics", "on", "analytics"),
        Setting::new("mapsApikey", "abc", "integrations"),
    ])
    .await?;

    for auth in [None, Some(common::token(Role::Admin))] {
        let mut req = common::client().get(server.url("/api/settings"));
        if let Some(token) = auth {
            req = req.bearer_auth(token);
        }
        let body = req.send().await?.json::<Value>().await?;
        let data = body["data"].as_object().unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data["siteTitle"], "Field Notes");
    }
    Ok(())
}

#[tokio::test]
async fn public_settings_by_category() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = common::client();

    let body = client
        .get(server.url("/api/settings?category=comments"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.contains_key("commentsEnabled"));

    let res = client.get(server.url("/api/settings?category=nonexistent")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], json!({}));
    Ok(())
}

#[tokio::test]
async fn admin_api_requires_admin() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = common::client();

    let res = client.get(server.url("/api/admin/settings")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(server.url("/api/admin/settings"))
        .bearer_auth(common::token(Role::User))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn admin_sees_unfiltered_settings() -> Result<()> {
    let server = common::spawn_server_with(vec![
        Setting::new("siteTitle", "Field Notes", "general"),
        Setting::new("stripe_secret", "sk_live_123", "payments"),
    ])
    .await?;

    let body = common::client()
        .get(server.url("/api/admin/settings"))
        .bearer_auth(common::token(Role::Admin))
        .send()
        .await?
        .json::<Value>()
        .await?;

    let settings = body["data"].as_array().unwrap();
    assert_eq!(settings.len(), 2);
    let secret = settings.iter().find(|s| s["key"] == "stripe_secret").unwrap();
    assert_eq!(secret["value"], "sk_live_123");
    assert_eq!(secret["visibility"], "private");
    Ok(())
}

#[tokio::test]
async fn admin_get_single_setting() -> Result<()> {
    let server = common::spawn_server_with(vec![Setting::new("siteTitle", "Field Notes", "general")]).await?;
    let client = common::client();
    let token = common::token(Role::Admin);

    let res = client
        .get(server.url("/api/admin/settings/siteTitle"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["category"], "general");

    let res = client
        .get(server.url("/api/admin/settings/missing"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn admin_update_writes_and_hides_private_values() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = common::client();

    let res = client
        .put(server.url("/api/admin/settings"))
        .bearer_auth(common::token(Role::Admin))
        .json(&json!({
            "settings": [
                { "key": "siteTitle", "value": "Field Notes", "category": "general" },
                { "key": "footerText", "value": "internal only", "visibility": "private" }
            ]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let stored = server.store.get("footerText").await?.unwrap();
    assert_eq!(stored.category, "general");

    let body = client
        .get(server.url("/api/settings"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"]["siteTitle"], "Field Notes");
    assert!(body["data"].get("footerText").is_none());
    Ok(())
}

#[tokio::test]
async fn admin_update_validates_input() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = common::client();
    let token = common::token(Role::Admin);

    let res = client
        .put(server.url("/api/admin/settings"))
        .bearer_auth(&token)
        .json(&json!({ "settings": [ { "key": "bad key", "value": "x" } ] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["updates[0].key"].is_string());

    let res = client
        .put(server.url("/api/admin/settings"))
        .bearer_auth(&token)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(server.store.fetch_all().await?.is_empty());
    Ok(())
}
