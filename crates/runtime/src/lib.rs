//! Runtime orchestration for the JABS combat engine.
//!
//! This crate wires the pure rules of `jabs-core` into a frame loop: it keeps
//! the active battlers, makes AI decisions, applies them through the host's
//! [`CombatEngine`], resolves procs, and persists loadouts.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the host boundary and error types
//! - [`ai`] holds the decision engine and phase dispatch
//! - [`effects`] resolves chance-based procs
//! - [`persistence`] encodes and validates saved loadouts
//! - [`registry`] keeps battlers in sweep order
pub mod ai;
pub mod api;
pub mod effects;
pub mod persistence;
pub mod registry;
pub mod runtime;

pub use ai::{AiContext, AiDecision, AiManager, AllyAi, EnemyAi, JabsAi};
pub use api::{CombatEngine, PersistenceError, Result, RuntimeError};
pub use effects::ProcResolver;
pub use persistence::{LoadoutRecord, decode_loadout, encode_loadout, read_loadout, write_loadout};
pub use registry::BattlerRegistry;
pub use runtime::{FrameReport, JabsRuntime, JabsRuntimeBuilder, RuntimeConfig};
