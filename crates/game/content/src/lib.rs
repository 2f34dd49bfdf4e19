//! Data-driven content for the JABS combat engine.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Combat tuning (`JabsConfig`, TOML)
//! - Skill catalogs (cooldowns, combo links, roles, procs; RON)
//! - Battler rosters with their starting loadouts (RON)
//!
//! Loaded content feeds the runtime's oracles and never appears in battler
//! save state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BattlerSpec, ConfigLoader, ContentFactory, RosterLoader, SkillCatalog, SkillLoader,
    SlotBinding,
};
