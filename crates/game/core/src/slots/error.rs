//! Errors raised by slot and loadout operations.

use crate::error::{ErrorSeverity, GameError};
use crate::slots::SlotKey;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// Assignment attempted on a locked slot. This is a player-input error.
    #[error("slot {key} is locked")]
    Locked { key: SlotKey },

    #[error("unknown slot key `{0}`")]
    UnknownKey(String),

    #[error("expected {expected} slots, found {found}")]
    Cardinality { expected: usize, found: usize },

    #[error("slot at index {index} should be {expected}, found {found}")]
    OutOfOrder {
        index: usize,
        expected: SlotKey,
        found: SlotKey,
    },
}

impl GameError for SlotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Locked { .. } => ErrorSeverity::Recoverable,
            Self::UnknownKey(_) => ErrorSeverity::Validation,
            Self::Cardinality { .. } | Self::OutOfOrder { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Locked { .. } => "SLOT_LOCKED",
            Self::UnknownKey(_) => "SLOT_UNKNOWN_KEY",
            Self::Cardinality { .. } => "SLOT_CARDINALITY",
            Self::OutOfOrder { .. } => "SLOT_OUT_OF_ORDER",
        }
    }
}
