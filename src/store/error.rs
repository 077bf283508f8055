//! Store failures.

use thiserror::Error;

use crate::core::EngineError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Someone else wrote the key since it was read. Re-read and retry.
    #[error("version conflict on {key}: expected {expected:?}, found {found:?}")]
    Conflict {
        key: String,
        expected: Option<u64>,
        found: Option<u64>,
    },

    #[error("codec error: {0}")]
    Codec(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("nothing stored at {key}")]
    Missing { key: String },
}

impl StoreError {
    pub fn codec(err: impl std::fmt::Display) -> Self {
        Self::Codec(err.to_string())
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
