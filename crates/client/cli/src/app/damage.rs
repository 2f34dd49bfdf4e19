use jabs_core::{Battler, DamageOracle, SkillData, SkillRole};

/// Damage model for the simulator: slower skills hit harder.
///
/// Attack skills deal `BASE + cooldown / 4`, doubled on a critical hit.
/// Heals return a negative value of half their cooldown. Every other role
/// deals nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimDamage;

impl SimDamage {
    pub const BASE: i64 = 4;
}

impl DamageOracle for SimDamage {
    fn make_damage_value(
        &self,
        _user: &dyn Battler,
        _target: &dyn Battler,
        skill: &SkillData,
        critical: bool,
    ) -> i64 {
        match skill.role {
            SkillRole::Attack => {
                let base = Self::BASE + skill.cooldown_frames as i64 / 4;
                if critical { base * 2 } else { base }
            }
            SkillRole::Heal => -(skill.cooldown_frames as i64 / 2).max(1),
            SkillRole::Dodge | SkillRole::Guard | SkillRole::Support => 0,
        }
    }
}
