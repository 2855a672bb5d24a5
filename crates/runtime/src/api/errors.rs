//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories and battle setup so clients can bubble
//! them up with consistent context.
use thiserror::Error;

use game_core::{ErrorSeverity, GameError, SetupError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("character {0} not found")]
    CharacterNotFound(String),

    #[error("character {0} has no loadout")]
    LoadoutNotFound(String),

    #[error("mission {0} not found")]
    MissionNotFound(String),

    #[error("idle session {0} not found")]
    SessionNotFound(String),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CharacterNotFound(_)
            | Self::LoadoutNotFound(_)
            | Self::MissionNotFound(_)
            | Self::SessionNotFound(_) => ErrorSeverity::Validation,
            Self::Setup(err) => err.severity(),
            Self::Repository(RepositoryError::LockPoisoned) => ErrorSeverity::Fatal,
            Self::Repository(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CharacterNotFound(_) => "CHARACTER_NOT_FOUND",
            Self::LoadoutNotFound(_) => "LOADOUT_NOT_FOUND",
            Self::MissionNotFound(_) => "MISSION_NOT_FOUND",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::Setup(err) => err.error_code(),
            Self::Repository(_) => "REPOSITORY",
        }
    }
}
