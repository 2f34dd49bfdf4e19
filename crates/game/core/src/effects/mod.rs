//! Probabilistic secondary effects ("procs").
//!
//! - [`OnChanceEffect`]: a (skill, percent chance, key) triple with a dice roll
//! - [`ProcTrigger`]: the moments a proc can fire (hit, cast, guard, defeat)
//! - [`ProcRolls`]: how many positive rolls and negative rerolls a battler gets
mod on_chance;

pub use on_chance::OnChanceEffect;

/// The combat moment a proc is evaluated at.
///
/// Each trigger maps to the string key stored on [`OnChanceEffect`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcTrigger {
    #[strum(serialize = "onHit")]
    OnHit,
    #[strum(serialize = "onCast")]
    OnCast,
    #[strum(serialize = "onGuard")]
    OnGuard,
    #[strum(serialize = "onDefeat")]
    OnDefeat,
}

/// Roll budget for a proc check.
///
/// `positive` is the number of attempts to succeed; `negative` is the number
/// of follow-up rolls that can each cancel a success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcRolls {
    pub positive: u32,
    pub negative: u32,
}

impl ProcRolls {
    pub const fn new(positive: u32, negative: u32) -> Self {
        Self { positive, negative }
    }
}

impl Default for ProcRolls {
    fn default() -> Self {
        Self::new(1, 0)
    }
}
