#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use jabs_core::{
    AiPhase, AlertTracker, AllyAiMode, Battler, BattlerId, BattlerKind, DamageOracle,
    MapCharacter, ProcRolls, ProcTrigger, SkillData, SkillId, SkillRole, SkillSlotManager,
    SkillTable, SlotKey,
};
use jabs_runtime::CombatEngine;

// ============================================================================
// Battler
// ============================================================================

/// Scripted battler with directly settable state.
#[derive(Debug)]
pub struct TestBattler {
    pub id: BattlerId,
    pub kind: BattlerKind,
    pub phase: AiPhase,
    pub slots: SkillSlotManager,
    pub alert: AlertTracker,
    pub moving: bool,
    pub target: Option<BattlerId>,
    pub hp: u32,
    pub max_hp: u32,
    pub last_used: Option<SlotKey>,
    /// `None` means every skill is castable.
    pub castable: Option<BTreeSet<SkillId>>,
    pub rolls: Option<ProcRolls>,
}

impl TestBattler {
    pub fn ally(id: u32, mode: AllyAiMode) -> Self {
        Self::new(id, BattlerKind::Ally { mode })
    }

    pub fn enemy(id: u32) -> Self {
        Self::new(id, BattlerKind::Enemy)
    }

    fn new(id: u32, kind: BattlerKind) -> Self {
        Self {
            id: BattlerId(id),
            kind,
            phase: AiPhase::Action,
            slots: SkillSlotManager::new(),
            alert: AlertTracker::new(),
            moving: false,
            target: None,
            hp: 100,
            max_hp: 100,
            last_used: None,
            castable: None,
            rolls: None,
        }
    }

    pub fn with_phase(mut self, phase: AiPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_slot(mut self, key: SlotKey, skill: u32) -> Self {
        self.slots
            .set_slot(key, SkillId(skill), false)
            .expect("fresh slot accepts a skill");
        self
    }

    pub fn targeting(mut self, target: u32) -> Self {
        self.target = Some(BattlerId(target));
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    pub fn only_castable(mut self, skills: &[u32]) -> Self {
        self.castable = Some(skills.iter().copied().map(SkillId).collect());
        self
    }

    /// Marks `key` as last used with its combo ready to continue into `next`.
    pub fn with_ready_combo(mut self, key: SlotKey, next: u32) -> Self {
        let cooldown = self.slots.slot_mut(key).cooldown_mut();
        cooldown.set_combo_next_action_id(SkillId(next));
        cooldown.set_combo_frames(0);
        self.last_used = Some(key);
        self
    }
}

impl MapCharacter for TestBattler {
    fn is_moving(&self) -> bool {
        self.moving
    }
}

impl Battler for TestBattler {
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

    fn can_execute_skill(&self, skill: SkillId) -> bool {
        self.castable
            .as_ref()
            .is_none_or(|castable| castable.contains(&skill))
    }

    fn is_alerted(&self) -> bool {
        self.alert.is_alerted()
    }

    fn character(&self) -> &dyn MapCharacter {
        self
    }

    fn target(&self) -> Option<BattlerId> {
        self.target
    }

    fn hp_rate(&self) -> u32 {
        self.hp * 100 / self.max_hp.max(1)
    }

    fn last_used_slot(&self) -> Option<SlotKey> {
        self.last_used
    }

    fn set_last_used_slot(&mut self, key: SlotKey) {
        self.last_used = Some(key);
    }

    fn proc_rolls(&self) -> Option<ProcRolls> {
        self.rolls
    }
}

// ============================================================================
// Engine
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineCall {
    DefaultPhase(BattlerId, AiPhase),
    SeekAlerter(BattlerId),
    EnemyAi(BattlerId),
    Setup(BattlerId, SlotKey, SkillId),
    Cancel(BattlerId),
    Proc(BattlerId, ProcTrigger, SkillId),
    Buzzer,
}

/// Records every call instead of acting on it.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
}

impl RecordingEngine {
    pub fn take(&mut self) -> Vec<EngineCall> {
        std::mem::take(&mut self.calls)
    }
}

impl CombatEngine<TestBattler> for RecordingEngine {
    fn run_default_phase(&mut self, battler: &mut TestBattler, phase: AiPhase) {
        self.calls.push(EngineCall::DefaultPhase(battler.id, phase));
    }

    fn seek_alerter(&mut self, battler: &mut TestBattler) {
        self.calls.push(EngineCall::SeekAlerter(battler.id));
    }

    fn decide_enemy_action(&mut self, battler: &mut TestBattler) {
        self.calls.push(EngineCall::EnemyAi(battler.id));
    }

    fn setup_action(&mut self, battler: &mut TestBattler, slot: SlotKey, skill: SkillId) {
        self.calls.push(EngineCall::Setup(battler.id, slot, skill));
    }

    fn cancel_setup(&mut self, battler: &mut TestBattler) {
        self.calls.push(EngineCall::Cancel(battler.id));
    }

    fn apply_proc(&mut self, battler: &mut TestBattler, trigger: ProcTrigger, skill: SkillId) {
        self.calls.push(EngineCall::Proc(battler.id, trigger, skill));
    }

    fn play_buzzer(&mut self) {
        self.calls.push(EngineCall::Buzzer);
    }
}

// ============================================================================
// Oracles
// ============================================================================

/// Fixed damage projections per skill: `(normal, critical)`.
#[derive(Debug, Default)]
pub struct TableDamage {
    projections: BTreeMap<SkillId, (i64, i64)>,
}

impl TableDamage {
    pub fn with(mut self, skill: u32, normal: i64, critical: i64) -> Self {
        self.projections.insert(SkillId(skill), (normal, critical));
        self
    }
}

impl DamageOracle for TableDamage {
    fn make_damage_value(
        &self,
        _user: &dyn Battler,
        _target: &dyn Battler,
        skill: &SkillData,
        critical: bool,
    ) -> i64 {
        self.projections
            .get(&skill.id)
            .map(|&(normal, crit)| if critical { crit } else { normal })
            .unwrap_or(0)
    }
}

/// Skill ids used across the integration tests.
pub mod skills {
    pub const SLASH: u32 = 1;
    pub const THRUST: u32 = 2;
    pub const CLEAVE: u32 = 3;
    pub const ROLL: u32 = 4;
    pub const FOLLOW_UP: u32 = 5;
    pub const MEND: u32 = 6;
    pub const WAR_CRY: u32 = 7;
    pub const POTION: u32 = 8;
    pub const SPARK: u32 = 40;
}

pub fn skill_table() -> SkillTable {
    use skills::*;

    [
        SkillData::new(SkillId(SLASH), "Slash")
            .with_cooldown(20)
            .with_combo(SkillId(FOLLOW_UP), 0),
        SkillData::new(SkillId(THRUST), "Thrust").with_cooldown(30),
        SkillData::new(SkillId(CLEAVE), "Cleave")
            .with_cooldown(60)
            .with_proc(jabs_core::OnChanceEffect::new(
                SkillId(SPARK),
                100,
                ProcTrigger::OnCast.as_ref(),
            )),
        SkillData::new(SkillId(ROLL), "Roll").with_role(SkillRole::Dodge),
        SkillData::new(SkillId(FOLLOW_UP), "Follow-up").with_cooldown(15),
        SkillData::new(SkillId(MEND), "Mend")
            .with_cooldown(90)
            .with_role(SkillRole::Heal),
        SkillData::new(SkillId(WAR_CRY), "War Cry")
            .with_cooldown(120)
            .with_role(SkillRole::Support),
        SkillData::new(SkillId(POTION), "Potion"),
        SkillData::new(SkillId(SPARK), "Spark"),
    ]
    .into_iter()
    .collect()
}

pub fn damage_table() -> TableDamage {
    use skills::*;

    TableDamage::default()
        .with(SLASH, 10, 15)
        .with(THRUST, 12, 14)
        .with(CLEAVE, 8, 30)
        .with(FOLLOW_UP, 20, 25)
}
