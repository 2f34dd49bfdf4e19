//! Enemy-side combo continuation.

use jabs_core::{Battler, SkillId};

use crate::ai::AiContext;
use crate::ai::decision::JabsAi;

/// JABS helpers for enemies.
///
/// Stock enemy action selection belongs to the host. When combo continuation
/// is enabled in the config, the AI manager consults this first.
pub struct EnemyAi;

impl EnemyAi {
    pub fn determine_combo_chance<B: Battler>(ctx: &AiContext<'_, B>) -> u32 {
        JabsAi::determine_combo_chance(ctx.config, ctx.config.enemy_combo_chance_modifier)
    }

    pub fn should_follow_with_combo<B: Battler>(ctx: &mut AiContext<'_, B>, user: &B) -> bool {
        let modifier = ctx.config.enemy_combo_chance_modifier;
        JabsAi::should_follow_with_combo(ctx, user, modifier)
    }

    /// The follow-up to use this frame, if the enemy continues its combo.
    pub fn decide_combo_action<B: Battler>(
        ctx: &mut AiContext<'_, B>,
        user: &B,
    ) -> Option<SkillId> {
        if Self::should_follow_with_combo(ctx, user) {
            JabsAi::combo_follow_up(user)
        } else {
            None
        }
    }
}
