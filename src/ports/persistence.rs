//! Shared persistence types for the record repositories.

use thiserror::Error;

use crate::domain::records::RecordKind;

/// Errors raised by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store rejected or failed the call.
    #[error("Failed to store {kind}: {reason}")]
    StoreFailed { kind: RecordKind, reason: String },

    /// The call succeeded but produced no row.
    #[error("Store returned no {kind} row")]
    NoRow { kind: RecordKind },

    /// A row expected by id does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: RecordKind, key: String },
}

impl PersistenceError {
    pub fn store_failed(kind: RecordKind, reason: impl Into<String>) -> Self {
        Self::StoreFailed {
            kind,
            reason: reason.into(),
        }
    }

    pub fn no_row(kind: RecordKind) -> Self {
        Self::NoRow { kind }
    }

    pub fn not_found(kind: RecordKind, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// The record kind the failing call was about.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::StoreFailed { kind, .. } | Self::NoRow { kind } | Self::NotFound { kind, .. } => {
                *kind
            }
        }
    }
}

/// Result of a find-or-create call.
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted<T> {
    pub record: T,
    /// True if the row did not exist before the call.
    pub created: bool,
}

impl<T> Upserted<T> {
    pub fn created(record: T) -> Self {
        Self {
            record,
            created: true,
        }
    }

    pub fn existing(record: T) -> Self {
        Self {
            record,
            created: false,
        }
    }
}
