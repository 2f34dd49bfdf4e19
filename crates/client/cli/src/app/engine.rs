//! Host side effects for the simulator.
//!
//! The engine owns what the combat runtime leaves to its host: phase
//! transitions, movement intent, the stock enemy AI, and the queue of hits
//! waiting to be resolved at the end of the frame.

use std::collections::BTreeMap;

use jabs_core::{AiPhase, Battler, BattlerId, ProcTrigger, SkillId, SkillOracle, SkillRole, SkillTable, SlotKey};
use jabs_runtime::CombatEngine;

use crate::app::battler::SimBattler;

/// A skill that went off and still has to land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingHit {
    pub user: BattlerId,
    pub target: Option<BattlerId>,
    pub skill: SkillId,
    /// Set for procs; `None` for a battler's own action.
    pub trigger: Option<ProcTrigger>,
}

#[derive(Debug)]
pub struct SimEngine {
    skills: SkillTable,
    positions: BTreeMap<BattlerId, i32>,
    hits: Vec<PendingHit>,
    recovery_frames: u32,
    pub buzzers: u32,
    pub enemy_actions: usize,
}

impl SimEngine {
    /// Cells a battler may be from its target and still act.
    pub const REACH: u32 = 1;
    pub const RECOVERY_FRAMES: u32 = 8;

    pub fn new(skills: SkillTable) -> Self {
        Self {
            skills,
            positions: BTreeMap::new(),
            hits: Vec::new(),
            recovery_frames: Self::RECOVERY_FRAMES,
            buzzers: 0,
            enemy_actions: 0,
        }
    }

    /// Snapshots battler positions before the runtime sweeps the frame.
    pub fn observe<'a>(&mut self, battlers: impl IntoIterator<Item = &'a SimBattler>) {
        self.positions = battlers
            .into_iter()
            .filter(|battler| battler.is_alive())
            .map(|battler| (battler.id, battler.character.x))
            .collect();
    }

    pub fn queue_proc(
        &mut self,
        user: BattlerId,
        target: Option<BattlerId>,
        trigger: ProcTrigger,
        skill: SkillId,
    ) {
        self.hits.push(PendingHit {
            user,
            target,
            skill,
            trigger: Some(trigger),
        });
    }

    pub fn take_hits(&mut self) -> Vec<PendingHit> {
        std::mem::take(&mut self.hits)
    }

    fn target_position(&self, battler: &SimBattler) -> Option<i32> {
        battler
            .target
            .and_then(|target| self.positions.get(&target).copied())
    }

    fn begin_recovery(&self, battler: &mut SimBattler) {
        battler.phase = AiPhase::PostAction;
        battler.recovery = self.recovery_frames;
        battler.character.destination = None;
    }

    /// First equipped attack whose base cooldown is ready.
    fn pick_enemy_slot(&self, battler: &SimBattler) -> Option<(SlotKey, SkillId)> {
        battler
            .slots
            .equipped_slots()
            .into_iter()
            .filter(|slot| slot.cooldown().is_base_ready())
            .filter(|slot| {
                self.skills
                    .skill(slot.skill_id())
                    .is_some_and(|data| data.role == SkillRole::Attack)
            })
            .map(|slot| (slot.key(), slot.skill_id()))
            .next()
    }
}

impl CombatEngine<SimBattler> for SimEngine {
    fn run_default_phase(&mut self, battler: &mut SimBattler, phase: AiPhase) {
        match phase {
            AiPhase::Idle => {
                if battler.target.is_some() {
                    battler.phase = AiPhase::PreAction;
                }
            }
            AiPhase::PreAction => {
                let Some(x) = self.target_position(battler) else {
                    battler.phase = AiPhase::Idle;
                    battler.character.destination = None;
                    return;
                };
                if battler.character.distance_to(x) <= Self::REACH {
                    battler.character.destination = None;
                    battler.phase = AiPhase::Action;
                } else {
                    battler.character.destination = Some(x);
                }
            }
            AiPhase::Action => {}
            AiPhase::PostAction => {
                battler.recovery = battler.recovery.saturating_sub(1);
                if battler.recovery == 0 {
                    battler.phase = AiPhase::Idle;
                }
            }
        }
    }

    fn seek_alerter(&mut self, battler: &mut SimBattler) {
        let Some(alerter) = battler.alerter else {
            return;
        };
        let Some(&x) = self.positions.get(&alerter) else {
            return;
        };

        tracing::debug!(battler = %battler.id, %alerter, "seeking alerter");
        battler.target = Some(alerter);
        battler.character.destination = Some(x);
    }

    fn decide_enemy_action(&mut self, battler: &mut SimBattler) {
        if self.target_position(battler).is_none() {
            battler.phase = AiPhase::Idle;
            return;
        }

        let Some((key, skill)) = self.pick_enemy_slot(battler) else {
            return;
        };
        let Some(data) = self.skills.skill(skill) else {
            return;
        };

        battler
            .slots
            .slot_mut(key)
            .cooldown_mut()
            .engage(data.cooldown_frames, data.combo);
        battler.set_last_used_slot(key);
        self.enemy_actions += 1;

        self.hits.push(PendingHit {
            user: battler.id,
            target: battler.target,
            skill,
            trigger: None,
        });
        self.begin_recovery(battler);
    }

    fn setup_action(&mut self, battler: &mut SimBattler, _slot: SlotKey, skill: SkillId) {
        self.hits.push(PendingHit {
            user: battler.id,
            target: battler.target,
            skill,
            trigger: None,
        });
        self.begin_recovery(battler);
    }

    fn cancel_setup(&mut self, battler: &mut SimBattler) {
        battler.phase = AiPhase::Idle;
    }

    fn apply_proc(&mut self, battler: &mut SimBattler, trigger: ProcTrigger, skill: SkillId) {
        self.queue_proc(battler.id, battler.target, trigger, skill);
    }

    fn play_buzzer(&mut self) {
        self.buzzers += 1;
    }
}
