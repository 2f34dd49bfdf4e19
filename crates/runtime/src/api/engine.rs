//! Host engine boundary.

use jabs_core::{AiPhase, Battler, ProcTrigger, SkillId, SlotKey};

/// Side effects the runtime asks the host engine to perform.
///
/// Everything spatial, visual or audible lives behind this trait; the runtime
/// only decides *whether* and *what*.
pub trait CombatEngine<B: Battler> {
    /// Runs the host's stock behavior for a phase the combat core leaves alone
    /// (idle wandering, approach, retreat).
    fn run_default_phase(&mut self, battler: &mut B, phase: AiPhase);

    /// Moves an idle ally toward whatever alerted it.
    fn seek_alerter(&mut self, battler: &mut B);

    /// Lets the host's stock enemy AI choose the next action.
    fn decide_enemy_action(&mut self, battler: &mut B);

    /// Prepares `skill` for execution from `slot`. The slot cooldown has
    /// already been engaged.
    fn setup_action(&mut self, battler: &mut B, slot: SlotKey, skill: SkillId);

    /// Drops any pending action setup for this frame.
    fn cancel_setup(&mut self, battler: &mut B);

    /// Executes a proc that fired for `battler`.
    fn apply_proc(&mut self, battler: &mut B, trigger: ProcTrigger, skill: SkillId);

    /// Audio cue for rejected player input.
    fn play_buzzer(&mut self);
}
