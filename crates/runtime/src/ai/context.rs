//! AI context for per-frame decision making.
//!
//! The [`AiContext`] is the "blackboard" handed to every decision helper. It
//! replaces ambient engine globals with explicit borrows:
//!
//! - the active battler registry (targets, allies)
//! - skill and damage oracles
//! - combat tuning
//! - the shared RNG, borrowed mutably for the duration of one battler's pass

use jabs_core::{Battler, BattlerId, DamageOracle, JabsConfig, RngOracle, SkillData, SkillId, SkillOracle};

use crate::registry::BattlerRegistry;

pub struct AiContext<'a, B> {
    pub registry: &'a BattlerRegistry<B>,
    pub skills: &'a dyn SkillOracle,
    pub damage: &'a dyn DamageOracle,
    pub config: &'a JabsConfig,
    pub rng: &'a mut dyn RngOracle,
}

impl<'a, B: Battler> AiContext<'a, B> {
    pub fn new(
        registry: &'a BattlerRegistry<B>,
        skills: &'a dyn SkillOracle,
        damage: &'a dyn DamageOracle,
        config: &'a JabsConfig,
        rng: &'a mut dyn RngOracle,
    ) -> Self {
        Self {
            registry,
            skills,
            damage,
            config,
            rng,
        }
    }

    pub fn battler(&self, id: BattlerId) -> Option<&'a B> {
        self.registry.get(id)
    }

    pub fn skill(&self, id: SkillId) -> Option<&'a SkillData> {
        self.skills.skill(id)
    }

    /// The battler's current target, if it is still registered.
    pub fn target_of(&self, battler: &B) -> Option<&'a B> {
        battler.target().and_then(|id| self.battler(id))
    }
}
