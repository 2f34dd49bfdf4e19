//! Deterministic real-time combat rules shared by every JABS host.
//!
//! `jabs-core` holds the data types and pure decisions of the combat engine:
//! frame timers, skill slots with dual cooldowns, chance-based procs, and the
//! battler boundary the AI reads through. It never logs, never allocates a
//! global, and never touches a concrete engine; hosts plug in through the
//! oracle traits in [`env`] and the [`battler::Battler`] trait.
pub mod battler;
pub mod config;
pub mod effects;
pub mod env;
pub mod error;
pub mod slots;
pub mod timer;

pub use battler::{
    AiPhase, AlertTracker, AllyAiMode, Battler, BattlerId, BattlerKind, MapCharacter,
};
pub use config::JabsConfig;
pub use effects::{OnChanceEffect, ProcRolls, ProcTrigger};
pub use env::{
    ComboLink, DamageOracle, PcgRng, ReplayRng, RngOracle, SkillData, SkillId, SkillOracle,
    SkillRole, SkillTable,
};
pub use error::{ErrorSeverity, GameError};
pub use slots::{Cooldown, SkillSlot, SkillSlotManager, SlotError, SlotFlags, SlotKey, SlotRefs};
pub use timer::{CompletionHook, Timer};
