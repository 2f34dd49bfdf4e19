//! Combat tuning loader.

use std::path::Path;

use jabs_core::JabsConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`JabsConfig`] from TOML files.
///
/// Every key is optional; missing keys keep their stock defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load combat tuning from a TOML file.
    pub fn load(path: &Path) -> LoadResult<JabsConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;

        tracing::debug!(path = %path.display(), "loaded combat config");
        Ok(config)
    }

    /// Parse combat tuning from TOML text.
    pub fn parse(content: &str) -> LoadResult<JabsConfig> {
        let config: JabsConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.base_combo_chance <= JabsConfig::MAX_CHANCE,
            "base_combo_chance must be within 0..={}, got {}",
            JabsConfig::MAX_CHANCE,
            config.base_combo_chance
        );
        anyhow::ensure!(
            config.support_hp_threshold <= JabsConfig::MAX_CHANCE,
            "support_hp_threshold is a percentage, got {}",
            config.support_hp_threshold
        );

        Ok(config)
    }
}
