//! Skill definitions and the oracle that serves them.
//!
//! The host engine owns the skill database; the combat core only needs the
//! handful of fields that drive cooldowns, combos, AI role filtering and
//! procs. [`SkillTable`] is an in-memory oracle for hosts and tools that load
//! skills from data files.

use std::collections::BTreeMap;

use crate::effects::{OnChanceEffect, ProcTrigger};

/// Identifier of a skill or item bound to a slot. Zero means "nothing".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub u32);

impl SkillId {
    pub const NONE: SkillId = SkillId(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl From<u32> for SkillId {
    fn from(value: u32) -> Self {
        SkillId(value)
    }
}

impl core::fmt::Display for SkillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

/// Broad purpose of a skill, used by AI modes to filter candidates.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillRole {
    /// Damaging action.
    #[default]
    Attack,
    /// Evasive movement; never chosen by ally AI.
    Dodge,
    /// Defensive stance.
    Guard,
    /// Restores HP of the target.
    Heal,
    /// Buffs or other non-damaging utility.
    Support,
}

/// Follow-up skill unlocked after a skill is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboLink {
    /// Skill that may be chained next.
    pub next: SkillId,
    /// Frames before the follow-up becomes available.
    pub delay_frames: u32,
}

impl ComboLink {
    pub fn new(next: SkillId, delay_frames: u32) -> Self {
        Self { next, delay_frames }
    }
}

/// The subset of skill data the combat core reads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillData {
    pub id: SkillId,
    pub name: String,
    /// Base cooldown applied to the slot that used this skill.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_frames: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combo: Option<ComboLink>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: SkillRole,
    /// On-chance effects keyed by trigger.
    #[cfg_attr(feature = "serde", serde(default))]
    pub procs: Vec<OnChanceEffect>,
}

impl SkillData {
    pub fn new(id: SkillId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cooldown_frames: 0,
            combo: None,
            role: SkillRole::Attack,
            procs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cooldown(mut self, frames: u32) -> Self {
        self.cooldown_frames = frames;
        self
    }

    #[must_use]
    pub fn with_combo(mut self, next: SkillId, delay_frames: u32) -> Self {
        self.combo = Some(ComboLink::new(next, delay_frames));
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: SkillRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_proc(mut self, effect: OnChanceEffect) -> Self {
        self.procs.push(effect);
        self
    }

    pub fn is_dodge(&self) -> bool {
        self.role == SkillRole::Dodge
    }

    /// Procs registered under the given trigger, in declaration order.
    pub fn procs_for(&self, trigger: ProcTrigger) -> impl Iterator<Item = &OnChanceEffect> {
        self.procs.iter().filter(move |effect| effect.matches(trigger))
    }
}

/// Read-only access to skill definitions.
pub trait SkillOracle {
    fn skill(&self, id: SkillId) -> Option<&SkillData>;

    fn contains(&self, id: SkillId) -> bool {
        self.skill(id).is_some()
    }
}

/// In-memory skill oracle backed by an ordered map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillTable {
    skills: BTreeMap<SkillId, SkillData>,
}

impl SkillTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a definition, returning the previous one.
    pub fn insert(&mut self, skill: SkillData) -> Option<SkillData> {
        self.skills.insert(skill.id, skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillData> {
        self.skills.values()
    }
}

impl FromIterator<SkillData> for SkillTable {
    fn from_iter<T: IntoIterator<Item = SkillData>>(iter: T) -> Self {
        let mut table = SkillTable::new();
        for skill in iter {
            table.insert(skill);
        }
        table
    }
}

impl SkillOracle for SkillTable {
    fn skill(&self, id: SkillId) -> Option<&SkillData> {
        self.skills.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procs_are_filtered_by_trigger() {
        let skill = SkillData::new(SkillId(3), "Flame Strike")
            .with_proc(OnChanceEffect::new(SkillId(40), 25, ProcTrigger::OnHit.as_ref()))
            .with_proc(OnChanceEffect::new(SkillId(41), 10, ProcTrigger::OnCast.as_ref()))
            .with_proc(OnChanceEffect::new(SkillId(42), 60, ProcTrigger::OnHit.as_ref()));

        let on_hit: Vec<SkillId> = skill
            .procs_for(ProcTrigger::OnHit)
            .map(|effect| effect.skill_id())
            .collect();
        assert_eq!(on_hit, vec![SkillId(40), SkillId(42)]);
        assert_eq!(skill.procs_for(ProcTrigger::OnDefeat).count(), 0);
    }

    #[test]
    fn table_lookup() {
        let table: SkillTable = [
            SkillData::new(SkillId(1), "Slash").with_cooldown(30),
            SkillData::new(SkillId(2), "Roll").with_role(SkillRole::Dodge),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 2);
        assert_eq!(table.skill(SkillId(1)).map(|s| s.cooldown_frames), Some(30));
        assert!(table.skill(SkillId(2)).is_some_and(SkillData::is_dodge));
        assert!(!table.contains(SkillId(9)));
    }

    #[test]
    fn role_parses_from_snake_case() {
        assert_eq!("heal".parse::<SkillRole>().ok(), Some(SkillRole::Heal));
        assert_eq!("DODGE".parse::<SkillRole>().ok(), Some(SkillRole::Dodge));
        assert_eq!(SkillRole::Support.to_string(), "support");
    }
}
