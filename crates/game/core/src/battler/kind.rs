/// Strategy an ally uses when deciding its next action.
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
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AllyAiMode {
    /// Never acts on its own.
    DoNothing,
    /// Mainhand attacks and combo follow-ups only.
    BasicAttack,
    /// Random castable skill.
    #[default]
    Variety,
    /// Strongest projected skill against the target.
    FullForce,
    /// Heals and buffs allies before attacking.
    Support,
}

/// Allegiance of a battler, dispatched once at the top of each AI phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlerKind {
    Ally { mode: AllyAiMode },
    Enemy,
}

impl BattlerKind {
    pub const fn is_enemy(&self) -> bool {
        matches!(self, Self::Enemy)
    }

    pub const fn is_ally(&self) -> bool {
        matches!(self, Self::Ally { .. })
    }

    pub const fn ally_mode(&self) -> Option<AllyAiMode> {
        match self {
            Self::Ally { mode } => Some(*mode),
            Self::Enemy => None,
        }
    }
}

/// Per-battler AI phase.
///
/// Phases 1 and 3 (approach and retreat movement) belong to the host's pathing
/// system; the combat core handles 0 and 2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AiPhase {
    /// Phase 0: no action pending; wander or seek an alerter.
    #[default]
    Idle = 0,
    /// Phase 1: closing distance before acting.
    PreAction = 1,
    /// Phase 2: choose and set up an action.
    Action = 2,
    /// Phase 3: recovering after an action.
    PostAction = 3,
}
