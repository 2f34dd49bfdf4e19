//! JABS AI: per-frame decisions for allies and enemies.
//!
//! # Structure
//!
//! - [`context`]: the [`AiContext`] blackboard (registry, oracles, RNG)
//! - [`decision`]: shared helpers ([`JabsAi`])
//! - [`ally`]: strategies per [`jabs_core::AllyAiMode`]
//! - [`enemy`]: enemy combo continuation
//! - [`manager`]: phase dispatch ([`AiManager`])
//! - [`types`]: the [`AiDecision`] the runtime applies
//!
//! Decisions are stateless per frame. An invalid choice is not an error; it
//! becomes [`AiDecision::CancelSetup`] and the battler tries again next frame.

pub mod ally;
pub mod context;
pub mod decision;
pub mod enemy;
pub mod manager;
pub mod types;

pub use ally::AllyAi;
pub use context::AiContext;
pub use decision::{Candidates, JabsAi};
pub use enemy::EnemyAi;
pub use manager::AiManager;
pub use types::AiDecision;
