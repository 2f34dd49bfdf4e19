//! Damage projection hook.

use crate::battler::Battler;
use crate::env::SkillData;

/// Evaluates the host's damage formula without applying it.
///
/// AI uses this to compare candidate skills against a target. Implementations
/// must be side-effect free: no HP changes, no RNG consumption, no popups.
pub trait DamageOracle {
    /// Projected damage of `skill` used by `user` on `target`.
    ///
    /// Healing may be reported as a negative value.
    fn make_damage_value(
        &self,
        user: &dyn Battler,
        target: &dyn Battler,
        skill: &SkillData,
        critical: bool,
    ) -> i64;
}
