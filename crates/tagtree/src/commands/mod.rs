//! CLI command implementations

pub mod inspect;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};
use tagtree_core::EngineConfig;

/// Loads the engine configuration, falling back to defaults.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn read_template(file: &Path) -> Result<String> {
    std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read template {}", file.display()))
}
