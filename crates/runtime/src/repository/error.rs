//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("{kind} {id} does not exist")]
    Missing { kind: &'static str, id: String },

    #[error("{kind} {id} already exists")]
    Duplicate { kind: &'static str, id: String },
}

impl<T> From<std::sync::PoisonError<T>> for RepositoryError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::LockPoisoned
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
