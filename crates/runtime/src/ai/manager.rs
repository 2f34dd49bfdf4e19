//! Per-battler AI phase dispatch.
//!
//! The manager decides, it never acts: every entry point returns an
//! [`AiDecision`] the runtime applies afterwards.

use jabs_core::{AiPhase, AllyAiMode, Battler, BattlerKind, SkillId, SlotKey};

use crate::ai::{AiContext, AiDecision, AllyAi, EnemyAi, JabsAi};

pub struct AiManager;

impl AiManager {
    /// Decision for the battler's current phase.
    pub fn update<B: Battler>(ctx: &mut AiContext<'_, B>, battler: &B) -> AiDecision {
        match battler.ai_phase() {
            AiPhase::Idle => Self::ai_phase0(battler),
            AiPhase::Action => Self::decide_ai_phase2_action(ctx, battler),
            phase @ (AiPhase::PreAction | AiPhase::PostAction) => AiDecision::DeferToEngine(phase),
        }
    }

    /// Phase 0: an alerted ally whose character has stopped moving seeks the
    /// alerter. Enemies never do.
    pub fn ai_phase0<B: Battler>(battler: &B) -> AiDecision {
        let seek_alerter = match battler.kind() {
            BattlerKind::Enemy => false,
            BattlerKind::Ally { .. } => battler.is_alerted() && !battler.character().is_moving(),
        };

        AiDecision::Idle { seek_alerter }
    }

    /// Phase 2: choose the action to set up.
    pub fn decide_ai_phase2_action<B: Battler>(
        ctx: &mut AiContext<'_, B>,
        battler: &B,
    ) -> AiDecision {
        match battler.kind() {
            BattlerKind::Enemy => Self::decide_enemy_action(ctx, battler),
            BattlerKind::Ally { mode } => Self::decide_ally_action(ctx, battler, mode),
        }
    }

    fn decide_enemy_action<B: Battler>(ctx: &mut AiContext<'_, B>, battler: &B) -> AiDecision {
        if ctx.config.enemy_combos
            && let Some(next) = EnemyAi::decide_combo_action(ctx, battler)
            && let Some(decision) = Self::accept(ctx, battler, next)
        {
            return decision;
        }

        AiDecision::DeferToEnemyAi
    }

    fn decide_ally_action<B: Battler>(
        ctx: &mut AiContext<'_, B>,
        battler: &B,
        mode: AllyAiMode,
    ) -> AiDecision {
        let Some(target) = ctx.target_of(battler) else {
            tracing::debug!(battler = %battler.id(), "no target, cancelling setup");
            return AiDecision::CancelSetup;
        };

        let candidates = JabsAi::filter_castable(battler, &battler.skill_slots().ally_skill_ids());
        let chosen = AllyAi::decide_action(mode, ctx, battler, target, &candidates);

        let Some(skill) = chosen.filter(|&id| JabsAi::is_skill_id_valid(id)) else {
            tracing::debug!(battler = %battler.id(), %mode, "ally chose nothing");
            return AiDecision::CancelSetup;
        };

        Self::accept(ctx, battler, skill).unwrap_or(AiDecision::CancelSetup)
    }

    /// Validates a chosen skill and resolves the slot whose cooldown it uses.
    fn accept<B: Battler>(ctx: &AiContext<'_, B>, battler: &B, skill: SkillId) -> Option<AiDecision> {
        let Some(data) = ctx.skill(skill) else {
            tracing::warn!(battler = %battler.id(), %skill, "chosen skill has no data");
            return None;
        };

        // allies do not auto-dodge yet
        if data.is_dodge() {
            tracing::debug!(battler = %battler.id(), %skill, "dodge rejected for phase 2");
            return None;
        }

        if !battler.can_execute_skill(skill) {
            tracing::debug!(battler = %battler.id(), %skill, "chosen skill not castable");
            return None;
        }

        let Some(slot) = Self::resolve_slot(battler, skill) else {
            tracing::debug!(battler = %battler.id(), %skill, "no slot owns chosen skill");
            return None;
        };

        Some(AiDecision::SetupAction { slot, skill })
    }

    /// A combo follow-up runs from the slot that started the chain; anything
    /// else from the first equipped slot holding it.
    fn resolve_slot<B: Battler>(battler: &B, skill: SkillId) -> Option<SlotKey> {
        if battler.has_combo_ready()
            && let Some(last) = battler.last_used_slot()
            && battler.combo_next_action_id(last) == skill
        {
            return Some(last);
        }

        battler
            .skill_slots()
            .slot_by_skill_id(skill)
            .map(|slot| slot.key())
    }
}
