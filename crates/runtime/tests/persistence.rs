mod common;

use common::skills::*;
use common::{TestBattler, damage_table, skill_table};
use jabs_core::{AllyAiMode, BattlerId, ComboLink, SkillId, SkillSlotManager, SlotKey};
use jabs_runtime::{
    JabsRuntime, LoadoutRecord, PersistenceError, RuntimeError, decode_loadout, encode_loadout,
    read_loadout, write_loadout,
};

fn mid_fight_loadout() -> SkillSlotManager {
    let mut slots = SkillSlotManager::new();
    slots.set_slot(SlotKey::Main, SkillId(SLASH), false).unwrap();
    slots.set_slot(SlotKey::Dodge, SkillId(ROLL), true).unwrap();
    slots.set_slot(SlotKey::R1B, SkillId(CLEAVE), true).unwrap();

    slots
        .slot_mut(SlotKey::Main)
        .cooldown_mut()
        .engage(17, Some(ComboLink::new(SkillId(FOLLOW_UP), 4)));
    slots.slot_mut(SlotKey::R1B).cooldown_mut().set_frames(33);
    slots.slot_mut(SlotKey::R1B).cooldown_mut().lock();
    slots
}

#[test]
fn loadout_round_trips_exactly() {
    let original = mid_fight_loadout();
    let restored = decode_loadout(&encode_loadout(&original).unwrap()).unwrap();
    assert_eq!(restored, original);

    let main = restored.slot(SlotKey::Main).cooldown();
    assert_eq!(main.base_frames(), 17);
    assert_eq!(main.combo_frames(), 4);
    assert_eq!(main.combo_next_action_id(), SkillId(FOLLOW_UP));
    assert!(!main.is_combo_ready());
    assert!(restored.slot(SlotKey::R1B).cooldown().is_locked());
    assert!(restored.slot(SlotKey::Dodge).is_locked());
}

#[test]
fn reordered_slots_are_refused() {
    let mut record = LoadoutRecord::capture(&mid_fight_loadout());
    record.slots.swap(0, 12);
    let bytes = bincode::serialize(&record).unwrap();

    let err = decode_loadout(&bytes).unwrap_err();
    assert!(matches!(err, PersistenceError::Slots(_)));
}

#[test]
fn file_round_trip_replaces_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ranger.loadout");

    write_loadout(&path, &SkillSlotManager::new()).unwrap();
    write_loadout(&path, &mid_fight_loadout()).unwrap();

    assert_eq!(read_loadout(&path).unwrap(), mid_fight_loadout());
    assert!(!path.with_extension("loadout.tmp").exists());
}

#[test]
fn runtime_saves_and_restores_battler_loadouts() {
    let mut ranger = TestBattler::ally(1, AllyAiMode::FullForce);
    ranger.slots = mid_fight_loadout();

    let mut runtime = JabsRuntime::builder()
        .skills(skill_table())
        .damage(damage_table())
        .battler(ranger)
        .battler(TestBattler::ally(2, AllyAiMode::Variety))
        .build()
        .unwrap();

    let bytes = runtime.save_loadout(BattlerId(1)).unwrap();
    runtime.restore_loadout(BattlerId(2), &bytes).unwrap();
    assert_eq!(
        runtime.battler(BattlerId(2)).unwrap().slots,
        mid_fight_loadout()
    );

    let err = runtime.restore_loadout(BattlerId(2), &bytes[..10]).unwrap_err();
    assert!(matches!(err, RuntimeError::Persistence(PersistenceError::Decode(_))));
    assert_eq!(
        runtime.battler(BattlerId(2)).unwrap().slots,
        mid_fight_loadout()
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.loadout");
    runtime.save_loadout_to(BattlerId(2), &path).unwrap();
    runtime.restore_loadout_from(BattlerId(1), &path).unwrap();

    assert!(matches!(
        runtime.save_loadout(BattlerId(9)),
        Err(RuntimeError::UnknownBattler(BattlerId(9)))
    ));
}
