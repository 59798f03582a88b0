use clap::Subcommand;
use serde_json::json;

use crate::cli::{
    utils::{output_error, output_success},
    OutputFormat,
};
use crate::config;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create missing tables and indexes")]
    Migrate,

    #[command(about = "Check that the database is reachable")]
    Check,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config::config().database;
    let target = match database.url.as_deref() {
        Some(url) => DatabaseManager::redact_url(url)?,
        None => {
            output_error(output_format, "DATABASE_URL is not set", Some("CONFIG_MISSING"))?;
            anyhow::bail!("DATABASE_URL is not set");
        }
    };
    let pool = DatabaseManager::connect(database).await?;

    match cmd {
        DbCommands::Migrate => {
            DatabaseManager::migrate(&pool).await?;
            output_success(
                output_format,
                "Schema applied",
                Some(json!({ "database": target })),
            )
        }
        DbCommands::Check => {
            DatabaseManager::health_check(&pool).await?;
            output_success(
                output_format,
                &format!("Database reachable at {}", target),
                Some(json!({ "database": target })),
            )
        }
    }
}
