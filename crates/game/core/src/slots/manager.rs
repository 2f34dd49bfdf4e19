//! Fixed loadout of skill slots for one battler.
//!
//! # Invariants
//!
//! - Exactly [`JabsConfig::SLOT_COUNT`] slots, one per [`SlotKey`], laid out in
//!   [`SlotKey::ALL`] order for the lifetime of the manager.
//! - External access is by key; the index is an internal detail.
//!
//! The cardinality is carried by the array type, so it cannot drift. Restoring
//! from a list ([`SkillSlotManager::from_slots`]) re-validates both count and
//! order.

use arrayvec::ArrayVec;

use crate::config::JabsConfig;
use crate::env::SkillId;
use crate::slots::{SkillSlot, SlotError, SlotKey};

/// Borrowed view over a subset of slots, in layout order.
pub type SlotRefs<'a> = ArrayVec<&'a SkillSlot, { JabsConfig::SLOT_COUNT }>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSlotManager {
    slots: [SkillSlot; JabsConfig::SLOT_COUNT],
}

impl SkillSlotManager {
    /// Creates the full set of empty slots.
    pub fn new() -> Self {
        Self {
            slots: SlotKey::ALL.map(SkillSlot::new),
        }
    }

    /// Rebuilds a manager from previously saved slots.
    ///
    /// # Errors
    ///
    /// - [`SlotError::Cardinality`] if the count isn't exactly thirteen
    /// - [`SlotError::OutOfOrder`] if a key sits at the wrong position
    pub fn from_slots(slots: impl IntoIterator<Item = SkillSlot>) -> Result<Self, SlotError> {
        let collected: Vec<SkillSlot> = slots.into_iter().collect();
        let found = collected.len();

        let slots: [SkillSlot; JabsConfig::SLOT_COUNT] =
            collected.try_into().map_err(|_| SlotError::Cardinality {
                expected: JabsConfig::SLOT_COUNT,
                found,
            })?;

        for (index, (slot, expected)) in slots.iter().zip(SlotKey::ALL).enumerate() {
            if slot.key() != expected {
                return Err(SlotError::OutOfOrder {
                    index,
                    expected,
                    found: slot.key(),
                });
            }
        }

        Ok(Self { slots })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All thirteen slots in layout order.
    pub fn all_slots(&self) -> &[SkillSlot] {
        &self.slots
    }

    /// The unique slot for a key.
    pub fn slot(&self, key: SlotKey) -> &SkillSlot {
        &self.slots[key.index()]
    }

    pub fn slot_mut(&mut self, key: SlotKey) -> &mut SkillSlot {
        &mut self.slots[key.index()]
    }

    /// Looks up a slot by its string key.
    pub fn slot_by_name(&self, key: &str) -> Result<&SkillSlot, SlotError> {
        let key: SlotKey = key
            .parse()
            .map_err(|_| SlotError::UnknownKey(key.to_owned()))?;
        Ok(self.slot(key))
    }

    /// First equipped slot holding `skill`, in layout order.
    ///
    /// Skill ids are not unique across slots, so this is the first plausible
    /// owner rather than an identity lookup.
    pub fn slot_by_skill_id(&self, skill: SkillId) -> Option<&SkillSlot> {
        if skill.is_none() {
            return None;
        }
        self.slots
            .iter()
            .find(|slot| slot.is_usable() && slot.skill_id() == skill)
    }

    /// Slots with something bound.
    pub fn equipped_slots(&self) -> SlotRefs<'_> {
        self.filtered(SkillSlot::is_usable)
    }

    pub fn primary_slots(&self) -> SlotRefs<'_> {
        self.filtered(SkillSlot::is_primary_slot)
    }

    pub fn secondary_slots(&self) -> SlotRefs<'_> {
        self.filtered(SkillSlot::is_secondary_slot)
    }

    pub fn equipped_primary_slots(&self) -> SlotRefs<'_> {
        self.filtered(|slot| slot.is_usable() && slot.is_primary_slot())
    }

    pub fn equipped_secondary_slots(&self) -> SlotRefs<'_> {
        self.filtered(|slot| slot.is_usable() && slot.is_secondary_slot())
    }

    /// Equipped slots an ally AI may pick from: everything but the tool slot.
    pub fn equipped_ally_slots(&self) -> SlotRefs<'_> {
        self.filtered(|slot| slot.is_usable() && slot.key() != SlotKey::Tool)
    }

    /// Skill ids of [`Self::equipped_ally_slots`], in layout order.
    pub fn ally_skill_ids(&self) -> ArrayVec<SkillId, { JabsConfig::SLOT_COUNT }> {
        self.equipped_ally_slots()
            .into_iter()
            .map(SkillSlot::skill_id)
            .collect()
    }

    fn filtered(&self, predicate: impl Fn(&SkillSlot) -> bool) -> SlotRefs<'_> {
        self.slots.iter().filter(|slot| predicate(slot)).collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Binds `skill` to `key`, then applies `locked`.
    ///
    /// The lock is applied even when the binding was rejected, so a locked slot
    /// must be unlocked before it can be reassigned.
    pub fn set_slot(&mut self, key: SlotKey, skill: SkillId, locked: bool) -> Result<(), SlotError> {
        let slot = self.slot_mut(key);
        let result = slot.set_skill_id(skill);
        slot.set_lock(locked);
        result
    }

    pub fn clear_slot(&mut self, key: SlotKey) {
        self.slot_mut(key).clear();
    }

    /// Unlocks every slot.
    pub fn unlock_all_slots(&mut self) {
        self.slots.iter_mut().for_each(SkillSlot::force_unlock);
    }

    /// Autoclears every slot whose skill matches `should_strip`.
    ///
    /// Returns how many slots were emptied.
    pub fn autoclear_where(&mut self, mut should_strip: impl FnMut(SkillId) -> bool) -> usize {
        self.slots
            .iter_mut()
            .filter(|slot| slot.is_usable() && should_strip(slot.skill_id()))
            .map(SkillSlot::autoclear)
            .filter(|cleared| *cleared)
            .count()
    }

    /// Advances the cooldown of every slot with a skill by one frame.
    pub fn update_cooldowns(&mut self) {
        self.slots
            .iter_mut()
            .filter(|slot| slot.is_usable())
            .for_each(|slot| slot.cooldown_mut().update());
    }
}

impl Default for SkillSlotManager {
    fn default() -> Self {
        Self::new()
    }
}
