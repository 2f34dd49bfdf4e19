//! Battler roster loader.
//!
//! A roster lists the battlers of a skirmish together with their starting
//! loadouts. Hosts turn each [`BattlerSpec`] into their own battler type.

use std::collections::BTreeSet;
use std::path::Path;

use jabs_core::{BattlerId, BattlerKind, SkillId, SkillSlotManager, SlotKey};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One skill bound to a slot at spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBinding {
    pub key: SlotKey,
    pub skill: SkillId,
    #[serde(default)]
    pub locked: bool,
}

/// A battler as described in a roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlerSpec {
    pub id: BattlerId,
    pub name: String,
    pub kind: BattlerKind,
    pub max_hp: u32,
    /// Starting HP; defaults to `max_hp`.
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub target: Option<BattlerId>,
    #[serde(default)]
    pub slots: Vec<SlotBinding>,
}

impl BattlerSpec {
    pub fn starting_hp(&self) -> u32 {
        self.hp.unwrap_or(self.max_hp).min(self.max_hp)
    }

    /// Builds the starting loadout.
    ///
    /// Bindings are applied in file order through the regular slot setter, so
    /// a later binding to a slot locked by an earlier one is rejected.
    pub fn build_loadout(&self) -> LoadResult<SkillSlotManager> {
        let mut slots = SkillSlotManager::new();
        for binding in &self.slots {
            slots
                .set_slot(binding.key, binding.skill, binding.locked)
                .map_err(|e| anyhow::anyhow!("battler {}: {}", self.id, e))?;
        }
        Ok(slots)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Roster {
    battlers: Vec<BattlerSpec>,
}

/// Loader for battler rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<BattlerSpec>> {
        let content = read_file(path)?;
        let battlers = Self::parse(&content)?;

        tracing::debug!(path = %path.display(), battlers = battlers.len(), "loaded roster");
        Ok(battlers)
    }

    /// Parse a roster, rejecting duplicate battler ids and zero max HP.
    pub fn parse(content: &str) -> LoadResult<Vec<BattlerSpec>> {
        let roster: Roster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for battler in &roster.battlers {
            anyhow::ensure!(seen.insert(battler.id), "duplicate battler id {}", battler.id.0);
            anyhow::ensure!(battler.max_hp > 0, "battler {} has no max HP", battler.id.0);
        }

        Ok(roster.battlers)
    }
}
