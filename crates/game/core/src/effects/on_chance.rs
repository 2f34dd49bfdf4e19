use crate::config::JabsConfig;
use crate::effects::ProcTrigger;
use crate::env::{RngOracle, SkillId};

/// A skill that fires with a percent chance when its key is triggered.
///
/// Immutable after construction; the chance is clamped to `0..=100`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnChanceEffect {
    skill_id: SkillId,
    chance: u32,
    key: String,
}

impl OnChanceEffect {
    pub fn new(skill_id: SkillId, chance: u32, key: impl Into<String>) -> Self {
        Self {
            skill_id,
            chance: chance.min(JabsConfig::MAX_CHANCE),
            key: key.into(),
        }
    }

    pub fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    pub fn chance(&self) -> u32 {
        self.chance
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matches(&self, trigger: ProcTrigger) -> bool {
        self.key == trigger.as_ref()
    }

    /// Rolls for this effect.
    ///
    /// Up to `positive_rolls` d100 rolls are made, stopping at the first one at
    /// or below the chance. A success is then challenged by up to
    /// `negative_rerolls` further rolls; the first of those that fails revokes
    /// the success. A zero chance never triggers and consumes no rolls.
    pub fn should_trigger<R>(&self, rng: &mut R, positive_rolls: u32, negative_rerolls: u32) -> bool
    where
        R: RngOracle + ?Sized,
    {
        if self.chance == 0 {
            return false;
        }

        let succeeded = (0..positive_rolls).any(|_| rng.roll_percent(self.chance));
        if !succeeded {
            return false;
        }

        for _ in 0..negative_rerolls {
            if !rng.roll_percent(self.chance) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ReplayRng};

    fn effect(chance: u32) -> OnChanceEffect {
        OnChanceEffect::new(SkillId(5), chance, "x")
    }

    #[test]
    fn zero_chance_never_triggers() {
        let mut rng = ReplayRng::new(vec![1]);
        for positive in 0..5 {
            for negative in 0..3 {
                assert!(!effect(0).should_trigger(&mut rng, positive, negative));
            }
        }
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn full_chance_triggers_on_first_roll() {
        let mut rng = PcgRng::new(11);
        for _ in 0..200 {
            assert!(effect(100).should_trigger(&mut rng, 1, 0));
        }
    }

    #[test]
    fn chance_is_clamped_on_construction() {
        assert_eq!(effect(250).chance(), 100);
    }

    #[test]
    fn second_positive_roll_can_succeed() {
        let mut rng = ReplayRng::new(vec![41, 10]);
        assert!(effect(40).should_trigger(&mut rng, 2, 0));
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn positive_rolls_stop_at_first_success() {
        let mut rng = ReplayRng::new(vec![90, 5, 95, 95]);
        assert!(effect(40).should_trigger(&mut rng, 3, 0));
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn all_positive_rolls_failing_returns_false() {
        let mut rng = ReplayRng::new(vec![80, 70, 60, 10]);
        assert!(!effect(40).should_trigger(&mut rng, 3, 0));
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn first_failing_negative_roll_revokes() {
        // success, then the first reroll fails: revoked without a second reroll
        let mut rng = ReplayRng::new(vec![10, 90, 10]);
        assert!(!effect(40).should_trigger(&mut rng, 1, 2));
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn surviving_every_negative_roll_keeps_success() {
        let mut rng = ReplayRng::new(vec![10, 20, 30]);
        assert!(effect(40).should_trigger(&mut rng, 1, 2));
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn zero_positive_rolls_is_no_attempt() {
        let mut rng = ReplayRng::new(vec![1]);
        assert!(!effect(100).should_trigger(&mut rng, 0, 0));
    }

    #[test]
    fn matches_trigger_key() {
        let on_hit = OnChanceEffect::new(SkillId(9), 50, "onHit");
        assert!(on_hit.matches(ProcTrigger::OnHit));
        assert!(!on_hit.matches(ProcTrigger::OnCast));
    }
}
