//! Content validation errors.
//!
//! File and parse failures travel as `anyhow` errors with context; these
//! typed errors cover catalogues that parse but do not hang together.

use game_core::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("{owner} references unknown ability '{slug}'")]
    UnknownAbility { owner: String, slug: String },

    #[error("mission {mission} references unknown enemy '{slug}'")]
    UnknownEnemy { mission: String, slug: String },

    #[error("{owner} references unknown item '{slug}'")]
    UnknownItem { owner: String, slug: String },

    #[error("duplicate {kind} '{slug}'")]
    DuplicateSlug { kind: &'static str, slug: String },

    #[error("no {kind} named '{slug}'")]
    NotFound { kind: &'static str, slug: String },
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAbility { .. } => "CONTENT_UNKNOWN_ABILITY",
            Self::UnknownEnemy { .. } => "CONTENT_UNKNOWN_ENEMY",
            Self::UnknownItem { .. } => "CONTENT_UNKNOWN_ITEM",
            Self::DuplicateSlug { .. } => "CONTENT_DUPLICATE_SLUG",
            Self::NotFound { .. } => "CONTENT_NOT_FOUND",
        }
    }
}
