use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::{Setting, SettingsError, SettingsStore, Visibility};

const CREATE_SETTINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS settings (
        key         TEXT PRIMARY KEY,
        value       TEXT NOT NULL,
        category    TEXT NOT NULL DEFAULT 'general',
        visibility  TEXT NOT NULL DEFAULT 'public',
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS settings_category_idx ON settings (category)";

/// PostgreSQL-backed settings.
///
/// The primary key on `key` plus `ON CONFLICT DO NOTHING` is what makes
/// concurrent seeding safe; a table without that constraint would accept
/// duplicate rows.
#[derive(Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the settings table and index if they are missing
    pub async fn ensure_schema(&self) -> Result<(), SettingsError> {
        sqlx::query(CREATE_SETTINGS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_CATEGORY_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    fn from_row(row: &PgRow) -> Result<Setting, SettingsError> {
        let visibility: String = row.try_get("visibility")?;
        let key: String = row.try_get("key")?;
        let visibility = Visibility::parse(&visibility).unwrap_or_else(|| {
            tracing::warn!("Unknown visibility '{}' on setting '{}', treating as private", visibility, key);
            Visibility::Private
        });

        Ok(Setting {
            key,
            value: row.try_get("value")?,
            category: row.try_get("category")?,
            visibility,
        })
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn fetch_all(&self) -> Result<Vec<Setting>, SettingsError> {
        let rows = sqlx::query("SELECT key, value, category, visibility FROM settings ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn get(&self, key: &str) -> Result<Option<Setting>, SettingsError> {
        let row = sqlx::query("SELECT key, value, category, visibility FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert_if_absent(&self, settings: &[Setting]) -> Result<u64, SettingsError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for setting in settings {
            let result = sqlx::query(
                r#"
                INSERT INTO settings (key, value, category, visibility)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (key) DO NOTHING
                "#,
            )
            .bind(&setting.key)
            .bind(&setting.value)
            .bind(&setting.category)
            .bind(setting.visibility.as_str())
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn upsert_many(&self, settings: &[Setting]) -> Result<(), SettingsError> {
        // Dropping the transaction on error rolls back the rows already written
        let mut tx = self.pool.begin().await?;

        for setting in settings {
            sqlx::query(
                r#"
                INSERT INTO settings (key, value, category, visibility)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value,
                    category = EXCLUDED.category,
                    visibility = EXCLUDED.visibility,
                    updated_at = now()
                "#,
            )
            .bind(&setting.key)
            .bind(&setting.value)
            .bind(&setting.category)
            .bind(setting.visibility.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), SettingsError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{default_settings, SettingsResolver};
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    // Needs a disposable PostgreSQL database; skipped when DATABASE_URL is unset.
    async fn connect() -> Option<PgSettingsStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = match PgPoolOptions::new().max_connections(4).connect(&url).await {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("Skipping test: PostgreSQL connection failed: {}", e);
                return None;
            }
        };
        let store = PgSettingsStore::new(pool);
        store.ensure_schema().await.ok()?;
        Some(store)
    }

    async fn test_store() -> Option<PgSettingsStore> {
        let store = connect().await?;
        sqlx::query("DELETE FROM settings").execute(&store.pool).await.ok()?;
        Some(store)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_seed_inserts_each_default_once() {
        let Some(store) = test_store().await else {
            eprintln!("Skipping test: DATABASE_URL not set");
            return;
        };
        let resolver = SettingsResolver::new(Arc::new(store.clone()));

        let (a, b) = tokio::join!(resolver.initialize_defaults(), resolver.initialize_defaults());
        let total = a.unwrap() + b.unwrap();

        assert_eq!(total, default_settings().len() as u64);
        assert_eq!(store.fetch_all().await.unwrap().len(), default_settings().len());
    }

    #[tokio::test]
    async fn failed_batch_leaves_no_rows_behind() {
        let Some(store) = connect().await else {
            eprintln!("Skipping test: DATABASE_URL not set");
            return;
        };
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let good = format!("batchGood_{}", suffix);
        let bad = format!("batchBad_{}", suffix);

        // PostgreSQL rejects NUL bytes in TEXT, failing the second row
        let result = store
            .upsert_many(&[
                Setting::new(good.as_str(), "fine", "general"),
                Setting::new(bad.as_str(), "nul\0byte", "general"),
            ])
            .await;

        assert!(result.is_err());
        assert!(store.get(&good).await.unwrap().is_none());
        assert!(store.get(&bad).await.unwrap().is_none());
    }
}
