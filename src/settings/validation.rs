use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use super::{Setting, Visibility};

pub const MAX_KEY_LEN: usize = 100;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_VALUE_LEN: usize = 10_000;
pub const MAX_UPDATES_PER_REQUEST: usize = 200;

/// One admin write. Omitted `category`/`visibility` keep the stored ones.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingUpdate {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

impl SettingUpdate {
    pub fn into_setting(self, existing: Option<&Setting>) -> Setting {
        let category = self
            .category
            .or_else(|| existing.map(|s| s.category.clone()))
            .unwrap_or_else(|| "general".to_string());
        let visibility = self
            .visibility
            .or_else(|| existing.map(|s| s.visibility))
            .unwrap_or_else(|| Visibility::for_key(&self.key));

        Setting {
            key: self.key,
            value: self.value,
            category,
            visibility,
        }
    }
}

fn is_identifier(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

/// Check a batch of writes, collecting errors per field (`updates[i].key`, ...)
pub fn validate_update(updates: &[SettingUpdate]) -> Result<(), HashMap<String, String>> {
    let mut errors = HashMap::new();

    if updates.is_empty() {
        errors.insert("updates".to_string(), "At least one setting is required".to_string());
        return Err(errors);
    }
    if updates.len() > MAX_UPDATES_PER_REQUEST {
        errors.insert(
            "updates".to_string(),
            format!("At most {} settings per request", MAX_UPDATES_PER_REQUEST),
        );
        return Err(errors);
    }

    let mut seen = HashSet::new();
    for (i, update) in updates.iter().enumerate() {
        let field = |name: &str| format!("updates[{}].{}", i, name);

        if update.key.is_empty() || update.key.len() > MAX_KEY_LEN {
            errors.insert(field("key"), format!("Key must be 1-{} characters", MAX_KEY_LEN));
        } else if !is_identifier(&update.key) {
            errors.insert(
                field("key"),
                "Key may only contain letters, numbers, '_', '-' and '.'".to_string(),
            );
        } else if !seen.insert(update.key.as_str()) {
            errors.insert(field("key"), format!("Duplicate key '{}'", update.key));
        }

        if update.value.len() > MAX_VALUE_LEN {
            errors.insert(field("value"), format!("Value exceeds {} bytes", MAX_VALUE_LEN));
        }

        if let Some(category) = &update.category {
            if category.is_empty() || category.len() > MAX_CATEGORY_LEN || !is_identifier(category) {
                errors.insert(
                    field("category"),
                    format!("Category must be 1-{} identifier characters", MAX_CATEGORY_LEN),
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
