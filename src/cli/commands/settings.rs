use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::settings::SettingsResolver;

pub async fn seed(config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    if config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL is not set; seeding the in-memory store would have no effect");
    }

    let store = DatabaseManager::settings_store(&config.database)
        .await
        .context("failed to open settings store")?;
    let resolver = SettingsResolver::new(store);

    let inserted = resolver.initialize_defaults().await?;
    let total = resolver.get_all().await?.len();

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "inserted": inserted, "total": total })),
        OutputFormat::Text => println!("Seeded {} default settings ({} total)", inserted, total),
    }
    Ok(())
}
