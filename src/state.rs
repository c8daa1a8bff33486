use std::sync::Arc;

use crate::config::AppConfig;
use crate::settings::{SettingsResolver, SettingsStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: SettingsResolver,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn SettingsStore>, config: AppConfig) -> Self {
        Self {
            settings: SettingsResolver::new(store),
            config: Arc::new(config),
        }
    }
}
