//! Battler capability boundary.
//!
//! The combat core never owns battlers. Hosts implement [`Battler`] for their
//! actor and enemy types; the core reads through it and writes only to the
//! battler's [`SkillSlotManager`] and last-used slot.
//!
//! - [`BattlerKind`]: ally or enemy, dispatched once per AI phase
//! - [`AllyAiMode`]: the pluggable strategy assigned to an ally
//! - [`AiPhase`]: the per-battler AI phase the manager runs
//! - [`MapCharacter`]: the visual character on the map
//! - [`AlertTracker`]: timer-backed alert state hosts can embed
mod alert;
mod kind;

pub use alert::AlertTracker;
pub use kind::{AiPhase, AllyAiMode, BattlerKind};

use crate::effects::ProcRolls;
use crate::env::SkillId;
use crate::slots::{SkillSlotManager, SlotKey};

/// Identifier of a battler in the active registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BattlerId(pub u32);

impl core::fmt::Display for BattlerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "battler#{}", self.0)
    }
}

/// The visual character a battler drives on the map.
pub trait MapCharacter {
    /// True while the character is stepping between tiles.
    fn is_moving(&self) -> bool;
}

/// Everything the combat core needs from a host battler.
pub trait Battler {
    fn id(&self) -> BattlerId;

    fn kind(&self) -> BattlerKind;

    fn ai_phase(&self) -> AiPhase;

    fn skill_slots(&self) -> &SkillSlotManager;

    fn skill_slots_mut(&mut self) -> &mut SkillSlotManager;

    /// Resource, state and restriction checks for using `skill` right now.
    fn can_execute_skill(&self, skill: SkillId) -> bool;

    fn is_alerted(&self) -> bool;

    fn character(&self) -> &dyn MapCharacter;

    /// Current combat target, if any.
    fn target(&self) -> Option<BattlerId>;

    /// Current HP as a percentage of max HP (0-100).
    fn hp_rate(&self) -> u32;

    fn last_used_slot(&self) -> Option<SlotKey>;

    fn set_last_used_slot(&mut self, key: SlotKey);

    /// Roll budget for this battler's procs; `None` uses the configured
    /// defaults.
    fn proc_rolls(&self) -> Option<ProcRolls> {
        None
    }

    /// True when the cooldown of the last-used slot has its combo ready.
    fn has_combo_ready(&self) -> bool {
        self.last_used_slot()
            .is_some_and(|key| self.skill_slots().slot(key).cooldown().is_combo_ready())
    }

    /// Follow-up skill recorded on the given slot's cooldown.
    fn combo_next_action_id(&self, key: SlotKey) -> SkillId {
        self.skill_slots().slot(key).cooldown().combo_next_action_id()
    }

    fn is_enemy(&self) -> bool {
        self.kind().is_enemy()
    }
}
