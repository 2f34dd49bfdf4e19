//! Unified error types surfaced by the runtime API.
//!
//! Only bookkeeping and persistence failures are errors. Conditions the
//! combat rules treat as silent (an AI with nothing to do, a skill write on a
//! locked slot) never reach this type.

use jabs_core::{BattlerId, ErrorSeverity, GameError, SlotError};
use thiserror::Error;

pub use crate::persistence::PersistenceError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0} is not registered")]
    UnknownBattler(BattlerId),

    #[error("{0} is already registered")]
    DuplicateBattler(BattlerId),

    #[error("runtime requires a {0} oracle before building")]
    MissingOracle(&'static str),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownBattler(_) | Self::DuplicateBattler(_) => ErrorSeverity::Validation,
            Self::MissingOracle(_) => ErrorSeverity::Fatal,
            Self::Slot(err) => err.severity(),
            Self::Persistence(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownBattler(_) => "RUNTIME_UNKNOWN_BATTLER",
            Self::DuplicateBattler(_) => "RUNTIME_DUPLICATE_BATTLER",
            Self::MissingOracle(_) => "RUNTIME_MISSING_ORACLE",
            Self::Slot(err) => err.error_code(),
            Self::Persistence(err) => err.error_code(),
        }
    }
}
