//! Content factory for loading a whole data directory.

use std::path::PathBuf;

use jabs_core::{JabsConfig, SkillTable};

use crate::loaders::{BattlerSpec, ConfigLoader, LoadResult, RosterLoader, SkillLoader};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tuning from `config.toml`, or the stock config when the
    /// file is absent.
    pub fn load_config(&self) -> LoadResult<JabsConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(JabsConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillTable> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the battler roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<BattlerSpec>> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skills.ron"), r#"(skills: [(id: 1, name: "Jab")])"#)
            .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), JabsConfig::default());
        assert_eq!(factory.load_skills().unwrap().len(), 1);
        assert!(factory.load_roster().is_err());
    }
}
