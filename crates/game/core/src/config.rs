/// Designer-tunable parameters for the combat engine.
///
/// None of these values are algorithmic; they only shift probabilities and
/// thresholds. Defaults reproduce the stock behaviour.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JabsConfig {
    /// Percent chance (0-100) that an AI continues a ready combo.
    pub base_combo_chance: u32,

    /// Added to `base_combo_chance` for ally AI. May be negative.
    pub ally_combo_chance_modifier: i32,

    /// Added to `base_combo_chance` for enemy AI. May be negative.
    pub enemy_combo_chance_modifier: i32,

    /// When set, enemies continue ready combos before handing their phase 2
    /// decision to the host's enemy AI.
    pub enemy_combos: bool,

    /// Allies below this HP percent are considered in need of healing by the
    /// support ally mode.
    pub support_hp_threshold: u32,

    /// Positive proc rolls granted to battlers that don't override them.
    pub default_positive_rolls: u32,

    /// Negative proc rerolls applied to battlers that don't override them.
    pub default_negative_rolls: u32,
}

impl JabsConfig {
    // ===== compile-time constants used as type parameters =====
    /// Total slots per battler: 1 global + 4 primary + 8 secondary.
    pub const SLOT_COUNT: usize = 13;
    pub const PRIMARY_SLOT_COUNT: usize = 4;
    pub const SECONDARY_SLOT_COUNT: usize = 8;
    /// Upper bound of every percent roll.
    pub const MAX_CHANCE: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_COMBO_CHANCE: u32 = 50;
    pub const DEFAULT_SUPPORT_HP_THRESHOLD: u32 = 50;

    pub fn new() -> Self {
        Self {
            base_combo_chance: Self::DEFAULT_BASE_COMBO_CHANCE,
            ally_combo_chance_modifier: 0,
            enemy_combo_chance_modifier: 0,
            enemy_combos: false,
            support_hp_threshold: Self::DEFAULT_SUPPORT_HP_THRESHOLD,
            default_positive_rolls: 1,
            default_negative_rolls: 0,
        }
    }

    /// Combo chance for a given AI modifier, clamped to `0..=MAX_CHANCE`.
    pub fn combo_chance(&self, modifier: i32) -> u32 {
        let chance = self.base_combo_chance as i64 + modifier as i64;
        chance.clamp(0, Self::MAX_CHANCE as i64) as u32
    }
}

impl Default for JabsConfig {
    fn default() -> Self {
        Self::new()
    }
}
