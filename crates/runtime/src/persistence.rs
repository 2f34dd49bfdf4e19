//! Loadout persistence.
//!
//! A loadout is the battler's thirteen slots with their cooldowns, stored as
//! bincode. Decoding goes through [`SkillSlotManager::from_slots`], so a
//! record with missing, extra or reordered slots is refused rather than
//! producing a malformed manager.
//!
//! # File Format
//!
//! Loadouts written to disk use `<name>.loadout` and are replaced atomically
//! through a `.tmp` sibling.

use std::fs;
use std::path::Path;

use jabs_core::{ErrorSeverity, GameError, SkillSlot, SkillSlotManager, SlotError, SlotKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current record layout version.
pub const LOADOUT_FORMAT: u16 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode loadout")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode loadout")]
    Decode(#[source] bincode::Error),

    #[error("loadout format {found} is not supported (expected {expected})")]
    UnsupportedFormat { found: u16, expected: u16 },

    #[error("slot {key} has a ready flag with frames still pending")]
    InconsistentCooldown { key: SlotKey },

    #[error("malformed loadout: {0}")]
    Slots(#[from] SlotError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError for PersistenceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) => ErrorSeverity::Recoverable,
            Self::UnsupportedFormat { .. } => ErrorSeverity::Validation,
            Self::Encode(_)
            | Self::Decode(_)
            | Self::InconsistentCooldown { .. }
            | Self::Slots(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "LOADOUT_ENCODE",
            Self::Decode(_) => "LOADOUT_DECODE",
            Self::UnsupportedFormat { .. } => "LOADOUT_FORMAT",
            Self::InconsistentCooldown { .. } => "LOADOUT_COOLDOWN",
            Self::Slots(_) => "LOADOUT_SLOTS",
            Self::Io(_) => "LOADOUT_IO",
        }
    }
}

/// Serialized form of one battler's loadout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutRecord {
    pub format: u16,
    pub slots: Vec<SkillSlot>,
}

impl LoadoutRecord {
    pub fn capture(manager: &SkillSlotManager) -> Self {
        Self {
            format: LOADOUT_FORMAT,
            slots: manager.all_slots().to_vec(),
        }
    }

    /// Rebuilds the manager, validating format, shape and cooldown flags.
    pub fn restore(self) -> Result<SkillSlotManager, PersistenceError> {
        if self.format != LOADOUT_FORMAT {
            return Err(PersistenceError::UnsupportedFormat {
                found: self.format,
                expected: LOADOUT_FORMAT,
            });
        }

        if let Some(slot) = self.slots.iter().find(|slot| !cooldown_consistent(slot)) {
            return Err(PersistenceError::InconsistentCooldown { key: slot.key() });
        }

        Ok(SkillSlotManager::from_slots(self.slots)?)
    }
}

fn cooldown_consistent(slot: &SkillSlot) -> bool {
    let cooldown = slot.cooldown();
    (!cooldown.is_base_ready() || cooldown.base_frames() == 0)
        && (!cooldown.is_combo_ready() || cooldown.combo_frames() == 0)
}

pub fn encode_loadout(manager: &SkillSlotManager) -> Result<Vec<u8>, PersistenceError> {
    bincode::serialize(&LoadoutRecord::capture(manager)).map_err(PersistenceError::Encode)
}

pub fn decode_loadout(bytes: &[u8]) -> Result<SkillSlotManager, PersistenceError> {
    let record: LoadoutRecord = bincode::deserialize(bytes).map_err(PersistenceError::Decode)?;
    record.restore()
}

/// Writes a loadout file, replacing any previous one atomically.
pub fn write_loadout(path: &Path, manager: &SkillSlotManager) -> Result<(), PersistenceError> {
    let bytes = encode_loadout(manager)?;
    let temp_path = path.with_extension("loadout.tmp");

    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;

    tracing::debug!("Saved loadout to {}", path.display());
    Ok(())
}

pub fn read_loadout(path: &Path) -> Result<SkillSlotManager, PersistenceError> {
    let bytes = fs::read(path)?;
    let manager = decode_loadout(&bytes)?;

    tracing::debug!("Loaded loadout from {}", path.display());
    Ok(manager)
}
