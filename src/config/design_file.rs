// config/design_file.rs - fallback design system persisted as JSON or YAML
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::database::models::DesignSystemConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON design file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML design file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read a design config. A missing file yields the built-in default;
/// an unreadable or malformed one is an error.
pub fn load_design_system(path: &Path) -> Result<DesignSystemConfig, ConfigError> {
    if !path.exists() {
        debug!("Design file {} not found, using default", path.display());
        return Ok(DesignSystemConfig::default());
    }

    let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let config = match Format::of(path) {
        Format::Json => serde_json::from_str(&raw)?,
        Format::Yaml => serde_yaml::from_str(&raw)?,
    };

    info!("Loaded design system from {}", path.display());
    Ok(config)
}

/// Write a design config, pretty-printed. Format follows the extension.
pub fn save_design_system(path: &Path, config: &DesignSystemConfig) -> Result<(), ConfigError> {
    let body = match Format::of(path) {
        Format::Json => serde_json::to_string_pretty(config)?,
        Format::Yaml => serde_yaml::to_string(config)?,
    };
    fs::write(path, body).map_err(|e| io_error(path, e))?;
    Ok(())
}
