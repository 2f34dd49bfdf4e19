//! Ally AI strategies.
//!
//! Each [`AllyAiMode`] maps to one strategy. Apart from `DoNothing`, every
//! mode first offers to continue a ready combo.

use jabs_core::{AllyAiMode, Battler, SkillId, SkillRole, SlotKey};

use crate::ai::AiContext;
use crate::ai::decision::JabsAi;

pub struct AllyAi;

impl AllyAi {
    /// Chooses the skill `user` should use against `target`.
    ///
    /// `candidates` are the castable skills of the user's equipped ally slots.
    /// `None` means the ally does nothing this frame.
    pub fn decide_action<B: Battler>(
        mode: AllyAiMode,
        ctx: &mut AiContext<'_, B>,
        user: &B,
        target: &B,
        candidates: &[SkillId],
    ) -> Option<SkillId> {
        match mode {
            AllyAiMode::DoNothing => None,
            AllyAiMode::BasicAttack => Self::basic_attack(ctx, user, candidates),
            AllyAiMode::Variety => {
                Self::combo(ctx, user).or_else(|| Self::random_pick(ctx, candidates))
            }
            AllyAiMode::FullForce => Self::combo(ctx, user).or_else(|| {
                JabsAi::determine_strongest_skill(ctx, user, target, candidates)
            }),
            AllyAiMode::Support => Self::support(ctx, user, candidates),
        }
    }

    fn combo<B: Battler>(ctx: &mut AiContext<'_, B>, user: &B) -> Option<SkillId> {
        let modifier = ctx.config.ally_combo_chance_modifier;
        if JabsAi::should_follow_with_combo(ctx, user, modifier) {
            JabsAi::combo_follow_up(user)
        } else {
            None
        }
    }

    fn basic_attack<B: Battler>(
        ctx: &mut AiContext<'_, B>,
        user: &B,
        candidates: &[SkillId],
    ) -> Option<SkillId> {
        if let Some(next) = Self::combo(ctx, user) {
            return Some(next);
        }

        let mainhand = user.skill_slots().slot(SlotKey::Main).skill_id();
        candidates.contains(&mainhand).then_some(mainhand)
    }

    fn random_pick<B: Battler>(ctx: &mut AiContext<'_, B>, candidates: &[SkillId]) -> Option<SkillId> {
        if candidates.is_empty() {
            return None;
        }

        let last = (candidates.len() - 1) as u32;
        let index = ctx.rng.range(0, last) as usize;
        candidates.get(index).copied()
    }

    fn support<B: Battler>(
        ctx: &mut AiContext<'_, B>,
        user: &B,
        candidates: &[SkillId],
    ) -> Option<SkillId> {
        let threshold = ctx.config.support_hp_threshold;
        let someone_hurt = ctx
            .registry
            .allies()
            .any(|ally| ally.hp_rate() < threshold);

        if someone_hurt && let Some(heal) = Self::first_with_role(ctx, candidates, SkillRole::Heal) {
            return Some(heal);
        }

        Self::first_with_role(ctx, candidates, SkillRole::Support)
            .or_else(|| Self::basic_attack(ctx, user, candidates))
    }

    fn first_with_role<B: Battler>(
        ctx: &AiContext<'_, B>,
        candidates: &[SkillId],
        role: SkillRole,
    ) -> Option<SkillId> {
        candidates
            .iter()
            .copied()
            .find(|&id| ctx.skill(id).is_some_and(|skill| skill.role == role))
    }
}
