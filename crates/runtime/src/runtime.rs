//! Frame-driven combat orchestrator.
//!
//! [`JabsRuntime`] owns the battler registry, the oracles and the shared RNG,
//! and exposes the per-frame sweep plus the player-facing slot operations.
//! Hosts drive it once per game frame through [`JabsRuntime::tick`] and
//! receive side effects through their [`CombatEngine`].

use std::path::Path;

use jabs_core::{
    AiPhase, Battler, BattlerId, DamageOracle, JabsConfig, PcgRng, ProcRolls, ProcTrigger,
    RngOracle, SkillId, SkillOracle, SlotError, SlotKey,
};

use crate::ai::{AiContext, AiDecision, AiManager};
use crate::api::{CombatEngine, Result, RuntimeError};
use crate::effects::ProcResolver;
use crate::persistence;
use crate::registry::BattlerRegistry;

/// Runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub jabs: JabsConfig,
    /// Seed for the shared RNG; a random seed is drawn when unset.
    pub seed: Option<u64>,
}

/// Outcome counts for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    /// Actions set up this frame.
    pub actions: usize,
    /// Phase 2 decisions that ended without an action.
    pub cancelled: usize,
}

pub struct JabsRuntime<B> {
    config: RuntimeConfig,
    registry: BattlerRegistry<B>,
    skills: Box<dyn SkillOracle>,
    damage: Box<dyn DamageOracle>,
    rng: Box<dyn RngOracle>,
    frame: u64,
}

impl<B: Battler> JabsRuntime<B> {
    pub fn builder() -> JabsRuntimeBuilder<B> {
        JabsRuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Frames processed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn registry(&self) -> &BattlerRegistry<B> {
        &self.registry
    }

    pub fn battler(&self, id: BattlerId) -> Option<&B> {
        self.registry.get(id)
    }

    pub fn battler_mut(&mut self, id: BattlerId) -> Option<&mut B> {
        self.registry.get_mut(id)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn register(&mut self, battler: B) -> Result<()> {
        let id = battler.id();
        self.registry.insert(battler)?;
        tracing::debug!(battler = %id, "registered battler");
        Ok(())
    }

    pub fn remove(&mut self, id: BattlerId) -> Option<B> {
        let removed = self.registry.remove(id);
        if removed.is_some() {
            tracing::debug!(battler = %id, "removed battler");
        }
        removed
    }

    // ========================================================================
    // Frame sweep
    // ========================================================================

    /// Advances one frame.
    ///
    /// Every battler's cooldowns tick first, then each battler in registry
    /// order gets its AI decision applied through `engine`.
    pub fn tick<E: CombatEngine<B>>(&mut self, engine: &mut E) -> FrameReport {
        self.frame += 1;

        for battler in self.registry.iter_mut() {
            battler.skill_slots_mut().update_cooldowns();
        }

        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };

        for index in 0..self.registry.len() {
            let Some(battler) = self.registry.by_index(index) else {
                break;
            };

            let mut ctx = AiContext::new(
                &self.registry,
                &*self.skills,
                &*self.damage,
                &self.config.jabs,
                &mut *self.rng,
            );
            let decision = AiManager::update(&mut ctx, battler);

            self.apply(index, decision, engine, &mut report);
        }

        report
    }

    fn apply<E: CombatEngine<B>>(
        &mut self,
        index: usize,
        decision: AiDecision,
        engine: &mut E,
        report: &mut FrameReport,
    ) {
        let Some(battler) = self.registry.by_index_mut(index) else {
            return;
        };

        match decision {
            AiDecision::Idle { seek_alerter } => {
                engine.run_default_phase(battler, AiPhase::Idle);
                if seek_alerter {
                    engine.seek_alerter(battler);
                }
            }
            AiDecision::DeferToEngine(phase) => engine.run_default_phase(battler, phase),
            AiDecision::DeferToEnemyAi => engine.decide_enemy_action(battler),
            AiDecision::CancelSetup => {
                report.cancelled += 1;
                engine.cancel_setup(battler);
            }
            AiDecision::SetupAction { slot, skill } => {
                let Some(data) = self.skills.skill(skill) else {
                    tracing::warn!(battler = %battler.id(), %skill, "skill vanished before setup");
                    report.cancelled += 1;
                    engine.cancel_setup(battler);
                    return;
                };

                battler
                    .skill_slots_mut()
                    .slot_mut(slot)
                    .cooldown_mut()
                    .engage(data.cooldown_frames, data.combo);
                battler.set_last_used_slot(slot);
                engine.setup_action(battler, slot, skill);
                report.actions += 1;

                tracing::debug!(battler = %battler.id(), %slot, %skill, "action set up");

                let rolls = battler
                    .proc_rolls()
                    .unwrap_or_else(|| default_rolls(&self.config.jabs));
                for proc_skill in ProcResolver::resolve(data, ProcTrigger::OnCast, rolls, &mut *self.rng) {
                    engine.apply_proc(battler, ProcTrigger::OnCast, proc_skill);
                }
            }
        }
    }

    // ========================================================================
    // Slot operations
    // ========================================================================

    /// Player-driven slot assignment.
    ///
    /// A locked slot rejects the write: the engine plays the buzzer and
    /// `Ok(false)` is returned.
    pub fn assign_skill<E: CombatEngine<B>>(
        &mut self,
        engine: &mut E,
        id: BattlerId,
        key: SlotKey,
        skill: SkillId,
        locked: bool,
    ) -> Result<bool> {
        let battler = self
            .registry
            .get_mut(id)
            .ok_or(RuntimeError::UnknownBattler(id))?;

        match battler.skill_slots_mut().set_slot(key, skill, locked) {
            Ok(()) => {
                tracing::debug!(battler = %id, %key, %skill, locked, "slot assigned");
                Ok(true)
            }
            Err(SlotError::Locked { key }) => {
                tracing::warn!(battler = %id, %key, "slot is locked, assignment rejected");
                engine.play_buzzer();
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// [`Self::assign_skill`] with the slot named by its string key.
    pub fn assign_skill_by_name<E: CombatEngine<B>>(
        &mut self,
        engine: &mut E,
        id: BattlerId,
        key: &str,
        skill: SkillId,
        locked: bool,
    ) -> Result<bool> {
        let Ok(slot) = key.parse::<SlotKey>() else {
            tracing::warn!(battler = %id, key, "unknown slot key");
            return Err(SlotError::UnknownKey(key.to_owned()).into());
        };
        self.assign_skill(engine, id, slot, skill, locked)
    }

    /// Clears every non-exempt slot holding a skill matched by `should_strip`.
    pub fn strip_skills(
        &mut self,
        id: BattlerId,
        should_strip: impl FnMut(SkillId) -> bool,
    ) -> Result<usize> {
        let battler = self
            .registry
            .get_mut(id)
            .ok_or(RuntimeError::UnknownBattler(id))?;

        let cleared = battler.skill_slots_mut().autoclear_where(should_strip);
        if cleared > 0 {
            tracing::debug!(battler = %id, cleared, "stripped skills from slots");
        }
        Ok(cleared)
    }

    pub fn unlock_all_slots(&mut self, id: BattlerId) -> Result<()> {
        self.registry
            .get_mut(id)
            .ok_or(RuntimeError::UnknownBattler(id))?
            .skill_slots_mut()
            .unlock_all_slots();
        Ok(())
    }

    // ========================================================================
    // Procs
    // ========================================================================

    /// Rolls the procs `skill` has for `trigger` on behalf of `id`.
    ///
    /// Missing skill data yields no procs.
    pub fn resolve_procs(
        &mut self,
        id: BattlerId,
        skill: SkillId,
        trigger: ProcTrigger,
    ) -> Result<Vec<SkillId>> {
        let battler = self
            .registry
            .get(id)
            .ok_or(RuntimeError::UnknownBattler(id))?;
        let Some(data) = self.skills.skill(skill) else {
            tracing::warn!(battler = %id, %skill, "no skill data for proc resolution");
            return Ok(Vec::new());
        };

        let rolls = battler
            .proc_rolls()
            .unwrap_or_else(|| default_rolls(&self.config.jabs));
        Ok(ProcResolver::resolve(data, trigger, rolls, &mut *self.rng))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn save_loadout(&self, id: BattlerId) -> Result<Vec<u8>> {
        let battler = self
            .registry
            .get(id)
            .ok_or(RuntimeError::UnknownBattler(id))?;
        Ok(persistence::encode_loadout(battler.skill_slots())?)
    }

    /// Replaces the battler's loadout with a saved one. The current loadout is
    /// untouched when decoding fails.
    pub fn restore_loadout(&mut self, id: BattlerId, bytes: &[u8]) -> Result<()> {
        let battler = self
            .registry
            .get_mut(id)
            .ok_or(RuntimeError::UnknownBattler(id))?;
        *battler.skill_slots_mut() = persistence::decode_loadout(bytes)?;
        Ok(())
    }

    pub fn save_loadout_to(&self, id: BattlerId, path: &Path) -> Result<()> {
        let battler = self
            .registry
            .get(id)
            .ok_or(RuntimeError::UnknownBattler(id))?;
        Ok(persistence::write_loadout(path, battler.skill_slots())?)
    }

    pub fn restore_loadout_from(&mut self, id: BattlerId, path: &Path) -> Result<()> {
        let battler = self
            .registry
            .get_mut(id)
            .ok_or(RuntimeError::UnknownBattler(id))?;
        *battler.skill_slots_mut() = persistence::read_loadout(path)?;
        Ok(())
    }
}

fn default_rolls(config: &JabsConfig) -> ProcRolls {
    ProcRolls::new(config.default_positive_rolls, config.default_negative_rolls)
}

/// Builder for [`JabsRuntime`].
pub struct JabsRuntimeBuilder<B> {
    config: RuntimeConfig,
    battlers: Vec<B>,
    skills: Option<Box<dyn SkillOracle>>,
    damage: Option<Box<dyn DamageOracle>>,
    rng: Option<Box<dyn RngOracle>>,
}

impl<B: Battler> JabsRuntimeBuilder<B> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            battlers: Vec::new(),
            skills: None,
            damage: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required skill oracle
    pub fn skills(mut self, skills: impl SkillOracle + 'static) -> Self {
        self.skills = Some(Box::new(skills));
        self
    }

    /// Set required damage oracle
    pub fn damage(mut self, damage: impl DamageOracle + 'static) -> Self {
        self.damage = Some(Box::new(damage));
        self
    }

    /// Use a specific RNG instead of a seeded [`PcgRng`].
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Register a battler at build time.
    pub fn battler(mut self, battler: B) -> Self {
        self.battlers.push(battler);
        self
    }

    pub fn build(self) -> Result<JabsRuntime<B>> {
        let skills = self.skills.ok_or(RuntimeError::MissingOracle("skill"))?;
        let damage = self.damage.ok_or(RuntimeError::MissingOracle("damage"))?;

        let rng = match self.rng {
            Some(rng) => rng,
            None => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                tracing::info!(seed, "seeding combat RNG");
                Box::new(PcgRng::new(seed)) as Box<dyn RngOracle>
            }
        };

        let mut registry = BattlerRegistry::new();
        for battler in self.battlers {
            registry.insert(battler)?;
        }

        Ok(JabsRuntime {
            config: self.config,
            registry,
            skills,
            damage,
            rng,
            frame: 0,
        })
    }
}
