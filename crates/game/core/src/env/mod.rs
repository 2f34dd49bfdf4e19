//! Traits describing data and services owned by the host engine.
//!
//! Oracles expose skill definitions, the damage formula, and the shared random
//! number generator. The combat core depends only on these traits, never on a
//! concrete engine.
mod damage;
mod rng;
mod skills;

pub use damage::DamageOracle;
pub use rng::{PcgRng, ReplayRng, RngOracle};
pub use skills::{ComboLink, SkillData, SkillId, SkillOracle, SkillRole, SkillTable};
