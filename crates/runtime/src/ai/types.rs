//! Decisions produced by the AI manager.

use jabs_core::{AiPhase, SkillId, SlotKey};

/// What a battler should do this frame.
///
/// Decisions are computed from read-only state and applied afterwards by the
/// runtime, so an AI pass never mutates a battler it is still reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiDecision {
    /// Phase 0. The host's idle behavior runs; an alerted, stationary ally
    /// additionally seeks the alerter.
    Idle { seek_alerter: bool },

    /// Engage `slot`'s cooldown and set up `skill`.
    SetupAction { slot: SlotKey, skill: SkillId },

    /// No valid action this frame; retried on the next one.
    CancelSetup,

    /// The host's enemy AI chooses.
    DeferToEnemyAi,

    /// A phase the combat core leaves to the host.
    DeferToEngine(AiPhase),
}
