use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::{
    self,
    design_file::{load_design_system, save_design_system},
};
use crate::database::models::DesignSystemConfig;
use crate::database::{DatabaseManager, DesignSystemStore, PgStore};

#[derive(Subcommand)]
pub enum DesignCommands {
    #[command(about = "Write the active design system (or the fallback) to a JSON/YAML file")]
    Export {
        #[arg(help = "Output file; .yaml/.yml selects YAML")]
        file: PathBuf,
    },

    #[command(about = "Write the built-in default design system to a JSON/YAML file")]
    Default {
        #[arg(help = "Output file; .yaml/.yml selects YAML")]
        file: PathBuf,
    },
}

pub async fn handle(cmd: DesignCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DesignCommands::Export { file } => {
            let (design, source) = current_design().await?;
            save_design_system(&file, &design)?;
            output_success(
                output_format,
                &format!("Exported {} design system to {}", source, file.display()),
                Some(json!({ "file": file.display().to_string(), "source": source })),
            )
        }
        DesignCommands::Default { file } => {
            save_design_system(&file, &DesignSystemConfig::default())?;
            output_success(
                output_format,
                &format!("Wrote default design system to {}", file.display()),
                Some(json!({ "file": file.display().to_string() })),
            )
        }
    }
}

/// Active record when a database is configured and one is active,
/// otherwise the configured fallback file or the built-in default
async fn current_design() -> anyhow::Result<(DesignSystemConfig, &'static str)> {
    let config = config::config();

    if config.database.url.is_some() {
        let pool = DatabaseManager::connect(&config.database).await?;
        if let Some(active) = PgStore::new(pool).get_active().await? {
            return Ok((active.config, "active"));
        }
    }

    let fallback = match &config.design.system_file {
        Some(path) => load_design_system(path)?,
        None => DesignSystemConfig::default(),
    };
    Ok((fallback, "fallback"))
}
