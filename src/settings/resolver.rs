use std::collections::BTreeMap;
use std::sync::Arc;

use super::{
    default_settings, is_sensitive_key, to_value_map, Setting, SettingUpdate, SettingsError,
    SettingsStore, Visibility,
};

/// Category-partitioned, default-seeded view over a `SettingsStore`
#[derive(Clone)]
pub struct SettingsResolver {
    store: Arc<dyn SettingsStore>,
    defaults: Arc<Vec<Setting>>,
}

impl SettingsResolver {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_defaults(store, default_settings())
    }

    pub fn with_defaults(store: Arc<dyn SettingsStore>, defaults: Vec<Setting>) -> Self {
        Self {
            store,
            defaults: Arc::new(defaults),
        }
    }

    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    /// Whole store as key -> value. Does not seed; see [`Self::resolve`].
    pub async fn get_all(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        Ok(to_value_map(&self.store.fetch_all().await?))
    }

    /// Entries of one category; an unknown category is just empty.
    ///
    /// Unfiltered and unseeded. The public endpoint reads through
    /// [`public_view`] instead, which applies the same category match after
    /// seeding and redaction.
    pub async fn get_by_category(&self, category: &str) -> Result<BTreeMap<String, String>, SettingsError> {
        let settings = self.store.fetch_all().await?;
        Ok(to_value_map(settings.iter().filter(|s| in_category(s, category))))
    }

    /// Write every default whose key is missing. Never overwrites; safe to
    /// run concurrently with itself.
    pub async fn initialize_defaults(&self) -> Result<u64, SettingsError> {
        let inserted = self.store.insert_if_absent(&self.defaults).await?;
        if inserted > 0 {
            tracing::info!("Seeded {} default settings", inserted);
        } else {
            tracing::debug!("Default settings already present");
        }
        Ok(inserted)
    }

    /// Read path used by the endpoints: fetch, seed once if empty, fetch again.
    ///
    /// Still empty after the retry means the seed did not land and the
    /// caller gets `Unavailable` rather than another attempt.
    pub async fn resolve(&self) -> Result<Vec<Setting>, SettingsError> {
        let settings = self.store.fetch_all().await?;
        if !settings.is_empty() {
            return Ok(settings);
        }

        tracing::info!("Settings store is empty, initializing defaults");
        self.initialize_defaults().await?;

        let settings = self.store.fetch_all().await?;
        if settings.is_empty() {
            tracing::error!("Settings store still empty after seeding defaults");
            return Err(SettingsError::Unavailable);
        }
        Ok(settings)
    }

    pub async fn get(&self, key: &str) -> Result<Setting, SettingsError> {
        self.store
            .get(key)
            .await?
            .ok_or_else(|| SettingsError::NotFound(key.to_string()))
    }

    /// Apply already-validated admin writes as one batch, returning the
    /// stored settings. A failed batch writes nothing.
    pub async fn apply_updates(&self, updates: Vec<SettingUpdate>) -> Result<Vec<Setting>, SettingsError> {
        let mut settings = Vec::with_capacity(updates.len());
        for update in updates {
            let existing = self.store.get(&update.key).await?;
            settings.push(update.into_setting(existing.as_ref()));
        }

        self.store.upsert_many(&settings).await?;
        tracing::info!("Updated {} settings", settings.len());
        Ok(settings)
    }
}

fn in_category(setting: &Setting, category: &str) -> bool {
    setting.category == category
}

/// Drop every entry whose key contains `secret`, `private` or `key`
/// (case-sensitive). Everything else passes through unchanged.
pub fn filter_public(settings: BTreeMap<String, String>) -> BTreeMap<String, String> {
    settings
        .into_iter()
        .filter(|(key, _)| !is_sensitive_key(key))
        .collect()
}

/// Public view of full settings: private-flagged entries go first, then the
/// key-name filter runs over what is left.
pub fn public_view<'a>(
    settings: impl IntoIterator<Item = &'a Setting>,
    category: Option<&str>,
) -> BTreeMap<String, String> {
    let visible = settings
        .into_iter()
        .filter(|s| s.visibility == Visibility::Public)
        .filter(|s| category.map_or(true, |c| in_category(s, c)));
    filter_public(to_value_map(visible))
}

/// category -> key -> value
pub fn group_by_category<'a>(
    settings: impl IntoIterator<Item = &'a Setting>,
) -> BTreeMap<String, BTreeMap<String, String>> {
    let mut grouped: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for setting in settings {
        grouped
            .entry(setting.category.clone())
            .or_default()
            .insert(setting.key.clone(), setting.value.clone());
    }
    grouped
}
