//! Content loaders for reading combat data from files.
//!
//! Every loader has a `load(path)` entry point and a `parse(text)` twin so data
//! embedded in tests and tools goes through the same validation.

pub mod config;
pub mod factory;
pub mod roster;
pub mod skills;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::{BattlerSpec, RosterLoader, SlotBinding};
pub use skills::{SkillCatalog, SkillLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
