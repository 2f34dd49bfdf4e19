use crate::env::SkillId;
use crate::slots::{Cooldown, SlotError, SlotKey};

/// One action-binding position: a key, the bound skill or item, a lock, and
/// the slot's cooldown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSlot {
    key: SlotKey,
    skill_id: SkillId,
    locked: bool,
    cooldown: Cooldown,
}

impl SkillSlot {
    /// An empty, unlocked slot.
    pub fn new(key: SlotKey) -> Self {
        Self {
            key,
            skill_id: SkillId::NONE,
            locked: false,
            cooldown: Cooldown::new(),
        }
    }

    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub fn cooldown_mut(&mut self) -> &mut Cooldown {
        &mut self.cooldown
    }

    /// True when something is bound here.
    pub fn is_usable(&self) -> bool {
        self.skill_id.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_usable()
    }

    pub fn is_primary_slot(&self) -> bool {
        self.key.is_primary()
    }

    pub fn is_secondary_slot(&self) -> bool {
        self.key.is_secondary()
    }

    /// Binds a skill. Rejected without change while the slot is locked.
    pub fn set_skill_id(&mut self, skill: SkillId) -> Result<(), SlotError> {
        if self.locked {
            return Err(SlotError::Locked { key: self.key });
        }

        self.skill_id = skill;
        Ok(())
    }

    /// Sets the lock. Ignored for lock-exempt keys (mainhand, offhand).
    pub fn set_lock(&mut self, locked: bool) {
        if self.key.is_lock_exempt() {
            return;
        }

        self.locked = locked;
    }

    /// Unlocks, then empties the slot.
    pub fn clear(&mut self) {
        self.locked = false;
        self.skill_id = SkillId::NONE;
    }

    /// Empties the slot during bulk sweeps, unless the key is exempt
    /// (mainhand, offhand, tool). Returns whether anything was removed.
    pub fn autoclear(&mut self) -> bool {
        if self.key.is_autoclear_exempt() || self.is_empty() {
            return false;
        }

        self.clear();
        true
    }

    /// Unconditional unlock used by bulk operations.
    pub(crate) fn force_unlock(&mut self) {
        self.locked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_exempt_slots_never_lock() {
        for key in [SlotKey::Main, SlotKey::Offhand] {
            let mut slot = SkillSlot::new(key);
            slot.set_lock(true);
            assert!(!slot.is_locked());
        }

        let mut dodge = SkillSlot::new(SlotKey::Dodge);
        dodge.set_lock(true);
        assert!(dodge.is_locked());
    }

    #[test]
    fn locked_slot_rejects_assignment() {
        let mut slot = SkillSlot::new(SlotKey::L1A);
        slot.set_skill_id(SkillId(3)).unwrap();
        slot.set_lock(true);

        let err = slot.set_skill_id(SkillId(9)).unwrap_err();
        assert_eq!(err, SlotError::Locked { key: SlotKey::L1A });
        assert_eq!(slot.skill_id(), SkillId(3));
    }

    #[test]
    fn clear_unlocks_then_empties() {
        let mut slot = SkillSlot::new(SlotKey::R1B);
        slot.set_skill_id(SkillId(5)).unwrap();
        slot.set_lock(true);

        slot.clear();
        assert!(!slot.is_locked());
        assert!(slot.is_empty());
    }

    #[test]
    fn autoclear_respects_exemptions() {
        for key in [SlotKey::Main, SlotKey::Offhand, SlotKey::Tool] {
            let mut slot = SkillSlot::new(key);
            slot.set_skill_id(SkillId(7)).unwrap();
            assert!(!slot.autoclear());
            assert_eq!(slot.skill_id(), SkillId(7));
        }

        let mut slot = SkillSlot::new(SlotKey::Dodge);
        slot.set_skill_id(SkillId(7)).unwrap();
        slot.set_lock(true);
        assert!(slot.autoclear());
        assert!(slot.is_empty());
    }

    #[test]
    fn usable_iff_nonzero() {
        let mut slot = SkillSlot::new(SlotKey::Tool);
        assert!(!slot.is_usable());
        slot.set_skill_id(SkillId(1)).unwrap();
        assert!(slot.is_usable());
        assert!(slot.is_primary_slot());
        assert!(!slot.is_secondary_slot());
    }
}
