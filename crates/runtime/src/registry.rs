//! Active battler registry.
//!
//! Battlers are kept in insertion order, which is the order every frame
//! sweep visits them in.

use jabs_core::{Battler, BattlerId};

use crate::api::{Result, RuntimeError};

#[derive(Debug)]
pub struct BattlerRegistry<B> {
    battlers: Vec<B>,
}

impl<B: Battler> BattlerRegistry<B> {
    pub fn new() -> Self {
        Self {
            battlers: Vec::new(),
        }
    }

    /// Appends a battler to the sweep order.
    pub fn insert(&mut self, battler: B) -> Result<()> {
        let id = battler.id();
        if self.contains(id) {
            return Err(RuntimeError::DuplicateBattler(id));
        }

        self.battlers.push(battler);
        Ok(())
    }

    /// Removes a battler, keeping the order of the rest.
    pub fn remove(&mut self, id: BattlerId) -> Option<B> {
        let index = self.position(id)?;
        Some(self.battlers.remove(index))
    }

    pub fn contains(&self, id: BattlerId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: BattlerId) -> Option<&B> {
        self.battlers.iter().find(|battler| battler.id() == id)
    }

    pub fn get_mut(&mut self, id: BattlerId) -> Option<&mut B> {
        self.battlers.iter_mut().find(|battler| battler.id() == id)
    }

    pub fn position(&self, id: BattlerId) -> Option<usize> {
        self.battlers.iter().position(|battler| battler.id() == id)
    }

    pub(crate) fn by_index(&self, index: usize) -> Option<&B> {
        self.battlers.get(index)
    }

    pub(crate) fn by_index_mut(&mut self, index: usize) -> Option<&mut B> {
        self.battlers.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &B> {
        self.battlers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut B> {
        self.battlers.iter_mut()
    }

    /// Non-enemy battlers, in sweep order.
    pub fn allies(&self) -> impl Iterator<Item = &B> {
        self.battlers.iter().filter(|battler| !battler.is_enemy())
    }

    pub fn len(&self) -> usize {
        self.battlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battlers.is_empty()
    }
}

impl<B: Battler> Default for BattlerRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}
