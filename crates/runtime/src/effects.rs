//! Proc resolution.

use jabs_core::{ProcRolls, ProcTrigger, RngOracle, SkillData, SkillId};

pub struct ProcResolver;

impl ProcResolver {
    /// Rolls every proc of `skill` registered under `trigger`.
    ///
    /// Returns the skills of the procs that fired, in declaration order. Each
    /// proc rolls independently with the same budget.
    pub fn resolve<R>(skill: &SkillData, trigger: ProcTrigger, rolls: ProcRolls, rng: &mut R) -> Vec<SkillId>
    where
        R: RngOracle + ?Sized,
    {
        let fired: Vec<SkillId> = skill
            .procs_for(trigger)
            .filter(|effect| effect.should_trigger(&mut *rng, rolls.positive, rolls.negative))
            .map(|effect| effect.skill_id())
            .collect();

        if !fired.is_empty() {
            tracing::debug!(skill = %skill.id, %trigger, ?fired, "procs fired");
        }

        fired
    }
}
