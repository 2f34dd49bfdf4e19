//! Skill slots, their cooldowns, and the per-battler loadout.
//!
//! Ownership: a battler owns one [`SkillSlotManager`], which owns thirteen
//! [`SkillSlot`]s, each owning one [`Cooldown`].
mod cooldown;
mod error;
mod key;
mod manager;
mod skill_slot;

pub use cooldown::Cooldown;
pub use error::SlotError;
pub use key::{SlotFlags, SlotKey};
pub use manager::{SkillSlotManager, SlotRefs};
pub use skill_slot::SkillSlot;
