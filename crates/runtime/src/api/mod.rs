//! Public runtime API surface.
//!
//! Gathers the types hosts interact with so the AI and frame loop modules can
//! stay focused on orchestration.

pub mod engine;
pub mod errors;

pub use engine::CombatEngine;
pub use errors::{PersistenceError, Result, RuntimeError};
