//! Simulated battler on a one-dimensional field.

use jabs_content::BattlerSpec;
use jabs_core::{
    AiPhase, AlertTracker, Battler, BattlerId, BattlerKind, MapCharacter, SkillId,
    SkillSlotManager, SlotKey,
};

/// Position and movement intent on the field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimCharacter {
    pub x: i32,
    pub destination: Option<i32>,
}

impl SimCharacter {
    pub fn at(x: i32) -> Self {
        Self { x, destination: None }
    }

    /// Moves one cell toward the destination, clearing it on arrival.
    pub fn step(&mut self) {
        let Some(destination) = self.destination else {
            return;
        };
        self.x += (destination - self.x).signum();
        if self.x == destination {
            self.destination = None;
        }
    }

    pub fn distance_to(&self, x: i32) -> u32 {
        self.x.abs_diff(x)
    }
}

impl MapCharacter for SimCharacter {
    fn is_moving(&self) -> bool {
        self.destination.is_some_and(|destination| destination != self.x)
    }
}

#[derive(Debug)]
pub struct SimBattler {
    pub id: BattlerId,
    pub name: String,
    pub kind: BattlerKind,
    pub phase: AiPhase,
    pub slots: SkillSlotManager,
    pub alert: AlertTracker,
    /// Who alerted this battler last.
    pub alerter: Option<BattlerId>,
    pub character: SimCharacter,
    pub hp: u32,
    pub max_hp: u32,
    pub target: Option<BattlerId>,
    pub last_used: Option<SlotKey>,
    /// Frames left in the post-action phase.
    pub recovery: u32,
}

impl SimBattler {
    pub fn from_spec(spec: &BattlerSpec, x: i32) -> anyhow::Result<Self> {
        Ok(Self {
            id: spec.id,
            name: spec.name.clone(),
            kind: spec.kind,
            phase: AiPhase::Idle,
            slots: spec.build_loadout()?,
            alert: AlertTracker::new(),
            alerter: None,
            character: SimCharacter::at(x),
            hp: spec.starting_hp(),
            max_hp: spec.max_hp,
            target: spec.target,
            last_used: None,
            recovery: 0,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies a signed HP change; negative amounts heal.
    pub fn take_damage(&mut self, amount: i64) {
        let hp = (self.hp as i64 - amount).clamp(0, self.max_hp as i64);
        self.hp = hp as u32;
    }

    pub fn is_hostile_to(&self, other: &SimBattler) -> bool {
        self.kind.is_enemy() != other.kind.is_enemy()
    }
}

impl Battler for SimBattler {
    fn id(&self) -> BattlerId {
        self.id
    }

    fn kind(&self) -> BattlerKind {
        self.kind
    }

    fn ai_phase(&self) -> AiPhase {
        self.phase
    }

    fn skill_slots(&self) -> &SkillSlotManager {
        &self.slots
    }

    fn skill_slots_mut(&mut self) -> &mut SkillSlotManager {
        &mut self.slots
    }

    /// A skill is usable from a slot whose base cooldown is ready, or as the
    /// ready follow-up of the last slot used.
    fn can_execute_skill(&self, skill: SkillId) -> bool {
        if !self.is_alive() {
            return false;
        }
        if let Some(key) = self.last_used
            && self.has_combo_ready()
            && self.combo_next_action_id(key) == skill
        {
            return true;
        }
        self.slots
            .slot_by_skill_id(skill)
            .is_some_and(|slot| slot.cooldown().is_base_ready())
    }

    fn is_alerted(&self) -> bool {
        self.alert.is_alerted()
    }

    fn character(&self) -> &dyn MapCharacter {
        &self.character
    }

    fn target(&self) -> Option<BattlerId> {
        self.target
    }

    fn hp_rate(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        ((self.hp as u64 * 100) / self.max_hp as u64) as u32
    }

    fn last_used_slot(&self) -> Option<SlotKey> {
        self.last_used
    }

    fn set_last_used_slot(&mut self, key: SlotKey) {
        self.last_used = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use jabs_content::SlotBinding;
    use jabs_core::AllyAiMode;

    use super::*;

    fn spec() -> BattlerSpec {
        BattlerSpec {
            id: BattlerId(1),
            name: "Ranger".into(),
            kind: BattlerKind::Ally {
                mode: AllyAiMode::FullForce,
            },
            max_hp: 200,
            hp: Some(50),
            target: None,
            slots: vec![SlotBinding {
                key: SlotKey::Main,
                skill: SkillId(1),
                locked: false,
            }],
        }
    }

    #[test]
    fn character_walks_to_destination() {
        let mut character = SimCharacter::at(0);
        character.destination = Some(3);
        assert!(character.is_moving());

        for _ in 0..3 {
            character.step();
        }
        assert_eq!(character.x, 3);
        assert!(!character.is_moving());
        assert_eq!(character.distance_to(-2), 5);
    }

    #[test]
    fn hp_rate_and_healing_are_clamped() {
        let mut battler = SimBattler::from_spec(&spec(), 0).unwrap();
        assert_eq!(battler.hp_rate(), 25);

        battler.take_damage(-500);
        assert_eq!(battler.hp, 200);
        battler.take_damage(999);
        assert!(!battler.is_alive());
        assert!(!battler.can_execute_skill(SkillId(1)));
    }

    #[test]
    fn skill_is_blocked_by_base_cooldown() {
        let mut battler = SimBattler::from_spec(&spec(), 0).unwrap();
        assert!(battler.can_execute_skill(SkillId(1)));
        assert!(!battler.can_execute_skill(SkillId(2)));

        battler.slots.slot_mut(SlotKey::Main).cooldown_mut().set_frames(5);
        assert!(!battler.can_execute_skill(SkillId(1)));
    }
}
