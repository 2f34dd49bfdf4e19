//! Dual-timer readiness tracker owned by each skill slot.
//!
//! A [`Cooldown`] tracks two independent countdowns:
//!
//! - **base**: frames until the slot's own skill can be used again
//! - **combo**: frames until the chained follow-up skill becomes available
//!
//! # Invariants
//!
//! - A ready flag is only ever true while its frame counter is zero.
//! - Any write that leaves a counter above zero clears its ready flag.
//! - A locked cooldown does not advance at all.
//!
//! # Combo readiness asymmetry
//!
//! Natural completion through [`Cooldown::update`] only marks the combo ready
//! when a follow-up skill is recorded. The explicit setters
//! ([`Cooldown::set_combo_frames`], [`Cooldown::mod_combo_frames`]) mark it
//! ready on reaching zero regardless. Both behaviours are relied upon by
//! callers and are kept distinct.

use crate::env::{ComboLink, SkillId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    base_frames: u32,
    base_ready: bool,
    combo_frames: u32,
    combo_ready: bool,
    combo_next_action_id: SkillId,
    locked: bool,
}

impl Cooldown {
    /// A fresh cooldown: base ready, no combo pending.
    pub fn new() -> Self {
        Self {
            base_frames: 0,
            base_ready: true,
            combo_frames: 0,
            combo_ready: false,
            combo_next_action_id: SkillId::NONE,
            locked: false,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn base_frames(&self) -> u32 {
        self.base_frames
    }

    pub fn combo_frames(&self) -> u32 {
        self.combo_frames
    }

    pub fn combo_next_action_id(&self) -> SkillId {
        self.combo_next_action_id
    }

    pub fn is_base_ready(&self) -> bool {
        self.base_ready
    }

    pub fn is_combo_ready(&self) -> bool {
        self.combo_ready
    }

    /// True if either the base skill or a combo follow-up can be used.
    pub fn is_any_ready(&self) -> bool {
        self.base_ready || self.combo_ready
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // ========================================================================
    // Frame updates
    // ========================================================================

    /// Advances both countdowns by one frame, base first.
    ///
    /// No-op while locked.
    pub fn update(&mut self) {
        if self.locked {
            return;
        }

        self.update_base();
        self.update_combo();
    }

    fn update_base(&mut self) {
        if self.base_ready {
            return;
        }

        self.base_frames = self.base_frames.saturating_sub(1);
        if self.base_frames == 0 {
            self.base_ready = true;
        }
    }

    fn update_combo(&mut self) {
        if self.combo_ready {
            return;
        }

        self.combo_frames = self.combo_frames.saturating_sub(1);
        if self.combo_frames == 0 {
            self.enable_combo();
        }
    }

    /// Tick-driven combo completion: only a recorded follow-up makes it ready.
    fn enable_combo(&mut self) {
        if self.combo_next_action_id.is_some() {
            self.combo_ready = true;
        }
    }

    // ========================================================================
    // Base timer
    // ========================================================================

    /// Sets the base countdown. Values at or below zero make the base ready.
    pub fn set_frames(&mut self, frames: i64) {
        if frames <= 0 {
            self.base_frames = 0;
            self.base_ready = true;
        } else {
            self.base_frames = clamp_frames(frames);
            self.base_ready = false;
        }
    }

    /// Adjusts the base countdown by `delta` frames.
    pub fn mod_base_frames(&mut self, delta: i64) {
        self.set_frames((self.base_frames as i64).saturating_add(delta));
    }

    // ========================================================================
    // Combo timer
    // ========================================================================

    /// Sets the combo countdown. Reaching zero here makes the combo ready even
    /// without a recorded follow-up.
    pub fn set_combo_frames(&mut self, frames: i64) {
        if frames <= 0 {
            self.combo_frames = 0;
            self.combo_ready = true;
        } else {
            self.combo_frames = clamp_frames(frames);
            self.combo_ready = false;
        }
    }

    /// Adjusts the combo countdown by `delta` frames.
    pub fn mod_combo_frames(&mut self, delta: i64) {
        self.set_combo_frames((self.combo_frames as i64).saturating_add(delta));
    }

    pub fn set_combo_next_action_id(&mut self, skill: SkillId) {
        self.combo_next_action_id = skill;
    }

    /// Drops any pending combo.
    pub fn reset_combo(&mut self) {
        self.combo_frames = 0;
        self.combo_next_action_id = SkillId::NONE;
        self.combo_ready = false;
    }

    /// Starts the cooldown after the slot's skill was used.
    ///
    /// With a combo link the follow-up is recorded and its delay applied
    /// through [`Cooldown::set_combo_frames`]; without one any pending combo is
    /// dropped.
    pub fn engage(&mut self, base_frames: u32, combo: Option<ComboLink>) {
        self.set_frames(base_frames as i64);

        match combo {
            Some(link) if link.next.is_some() => {
                self.set_combo_next_action_id(link.next);
                self.set_combo_frames(link.delay_frames as i64);
            }
            _ => self.reset_combo(),
        }
    }

    // ========================================================================
    // Locking
    // ========================================================================

    /// Freezes both countdowns.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn clamp_frames(frames: i64) -> u32 {
    frames.clamp(0, u32::MAX as i64) as u32
}
