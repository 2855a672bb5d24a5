//! Error classification shared by every crate built on the engine.
//!
//! A running battle cannot fail: a missing target becomes a `Skip` entry and
//! formula kinds are a closed enum. Only turning caller data into actors can
//! go wrong, and that is reported as [`SetupError`] before the first round.

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Bad ids or content; retrying the same request fails again.
    Validation,

    /// A store broke its own contract, e.g. a record vanished mid-request.
    Internal,

    /// Shared state can no longer be trusted (poisoned lock).
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Severity and a stable code, implemented by every error enum in the
/// workspace so binaries can report failures uniformly.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Upper snake case identifier, e.g. `SETUP_NO_ENEMIES`.
    fn error_code(&self) -> &'static str;
}

/// Errors raised while building a battle from character and mission data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("mission {mission} has no enemies to fight")]
    NoEnemies { mission: String },

    #[error("mission {mission} lists enemy {template} with quantity 0")]
    EmptyEnemyGroup { mission: String, template: String },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEnemies { .. } | Self::EmptyEnemyGroup { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEnemies { .. } => "SETUP_NO_ENEMIES",
            Self::EmptyEnemyGroup { .. } => "SETUP_EMPTY_ENEMY_GROUP",
        }
    }
}
