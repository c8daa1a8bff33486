//! Settings: a flat key/value store viewed by category, seeded with defaults
//! on first read and redacted for public callers.

pub mod memory;
pub mod postgres;
pub mod resolver;
pub mod validation;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use memory::MemorySettingsStore;
pub use postgres::PgSettingsStore;
pub use resolver::{filter_public, group_by_category, public_view, SettingsResolver};
pub use validation::{validate_update, SettingUpdate};

/// Substrings that mark a key as sensitive for public reads
pub const SENSITIVE_KEY_MARKERS: [&str; 3] = ["secret", "private", "key"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Visibility implied by the key naming convention
    pub fn for_key(key: &str) -> Self {
        if is_sensitive_key(key) {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

pub fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEY_MARKERS.iter().any(|marker| key.contains(marker))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub category: String,
    pub visibility: Visibility,
}

impl Setting {
    /// New setting whose visibility follows the key naming convention
    pub fn new(key: impl Into<String>, value: impl Into<String>, category: impl Into<String>) -> Self {
        let key = key.into();
        let visibility = Visibility::for_key(&key);
        Self {
            key,
            value: value.into(),
            category: category.into(),
            visibility,
        }
    }
}

/// Default table written by `initialize_defaults`
pub fn default_settings() -> Vec<Setting> {
    vec![
        Setting::new("siteTitle", "My Blog", "general"),
        Setting::new("siteDescription", "Just another blog", "general"),
        Setting::new("postsPerPage", "10", "reading"),
        Setting::new("commentsEnabled", "true", "comments"),
        Setting::new("commentsRequireApproval", "true", "comments"),
        Setting::new("newsletterEnabled", "false", "newsletter"),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Setting not found: {0}")]
    NotFound(String),

    #[error("Settings store is empty after seeding defaults")]
    Unavailable,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistent key/value backend for settings.
///
/// `insert_if_absent` must be atomic per key: concurrent callers may race
/// on the same keys and none of them may overwrite or duplicate a row.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Setting>, SettingsError>;

    async fn get(&self, key: &str) -> Result<Option<Setting>, SettingsError>;

    /// Write each setting whose key is not present yet; returns how many were written
    async fn insert_if_absent(&self, settings: &[Setting]) -> Result<u64, SettingsError>;

    /// Insert or replace every setting in the batch. All or nothing: on
    /// error none of the batch is visible.
    async fn upsert_many(&self, settings: &[Setting]) -> Result<(), SettingsError>;

    async fn health_check(&self) -> Result<(), SettingsError>;
}

/// Flatten settings into a key/value map
pub fn to_value_map<'a>(settings: impl IntoIterator<Item = &'a Setting>) -> BTreeMap<String, String> {
    settings
        .into_iter()
        .map(|s| (s.key.clone(), s.value.clone()))
        .collect()
}
