//! Decision helpers shared by every JABS AI.
//!
//! These are the building blocks ally modes and the enemy combo hook compose:
//! combo continuation, strongest-skill projection, candidate validation and
//! castability filtering. All of them read state only; the RNG is the one
//! thing they advance.

use arrayvec::ArrayVec;
use jabs_core::{Battler, JabsConfig, SkillId};

use crate::ai::AiContext;

/// Candidate skill ids for one decision, in slot layout order.
pub type Candidates = ArrayVec<SkillId, { JabsConfig::SLOT_COUNT }>;

pub struct JabsAi;

impl JabsAi {
    /// Chance to continue a ready combo for an AI with the given modifier.
    pub fn determine_combo_chance(config: &JabsConfig, modifier: i32) -> u32 {
        config.combo_chance(modifier)
    }

    /// Decides whether `user` continues its ready combo this frame.
    ///
    /// Requires, in order: a ready combo on the last-used slot, a recorded
    /// follow-up the battler can execute right now, and a successful percent
    /// roll. The roll is only made once the other checks pass.
    pub fn should_follow_with_combo<B: Battler>(
        ctx: &mut AiContext<'_, B>,
        user: &B,
        modifier: i32,
    ) -> bool {
        if !user.has_combo_ready() {
            return false;
        }

        let Some(next) = Self::combo_follow_up(user) else {
            return false;
        };
        if !user.can_execute_skill(next) {
            tracing::debug!(battler = %user.id(), skill = %next, "combo follow-up not castable");
            return false;
        }

        let chance = Self::determine_combo_chance(ctx.config, modifier);
        ctx.rng.roll_percent(chance)
    }

    /// Follow-up recorded on the last-used slot, if any.
    pub fn combo_follow_up<B: Battler>(user: &B) -> Option<SkillId> {
        let key = user.last_used_slot()?;
        let next = user.combo_next_action_id(key);
        Self::is_skill_id_valid(next).then_some(next)
    }

    /// Picks the candidate with the highest projected damage on `target`.
    ///
    /// Each candidate is projected both ways; a critical projection above the
    /// running best wins outright, otherwise the plain projection is compared.
    /// Ties keep the earlier candidate. Returns `None` when nothing projects
    /// positive damage.
    pub fn determine_strongest_skill<B: Battler>(
        ctx: &AiContext<'_, B>,
        user: &B,
        target: &B,
        candidates: &[SkillId],
    ) -> Option<SkillId> {
        let mut strongest = None;
        let mut highest = 0_i64;

        for &id in candidates {
            let Some(skill) = ctx.skill(id) else {
                tracing::debug!(skill = %id, "no skill data, skipping projection");
                continue;
            };

            let damage = ctx.damage.make_damage_value(user, target, skill, false);
            let critical = ctx.damage.make_damage_value(user, target, skill, true);

            if critical > highest {
                highest = critical;
                strongest = Some(id);
            } else if damage > highest {
                highest = damage;
                strongest = Some(id);
            }
        }

        strongest
    }

    /// Zero is the only id that can never be a candidate.
    pub fn is_skill_id_valid(id: SkillId) -> bool {
        id.is_some()
    }

    /// Candidates the user can execute right now, order preserved.
    pub fn filter_castable<B: Battler>(user: &B, candidates: &[SkillId]) -> Candidates {
        candidates
            .iter()
            .copied()
            .filter(|&id| Self::is_skill_id_valid(id) && user.can_execute_skill(id))
            .collect()
    }
}
