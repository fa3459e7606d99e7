//! Error types for board coordination

use thiserror::Error;
use trellis_position::{PositionError, ScopeKind};

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while coordinating board changes
#[derive(Debug, Error)]
pub enum BoardError {
    /// Scope is not known to the cache
    #[error("{kind} scope not found: {id}")]
    ScopeNotFound { kind: ScopeKind, id: String },

    /// Item already exists in the cache
    #[error("duplicate {kind} ID: {id}")]
    DuplicateItem { kind: ScopeKind, id: String },

    /// Persistence collaborator rejected an update
    #[error("failed to persist position of {item_id}: {message}")]
    Persistence { item_id: String, message: String },

    /// Realtime collaborator failed to deliver an event
    #[error("failed to broadcast move of {item_id}: {message}")]
    Broadcast { item_id: String, message: String },

    /// Invalid position data
    #[error(transparent)]
    Position(#[from] PositionError),
}

impl BoardError {
    /// Create a persistence error
    pub fn persistence(item_id: impl ToString, message: impl Into<String>) -> Self {
        Self::Persistence {
            item_id: item_id.to_string(),
            message: message.into(),
        }
    }

    /// Create a broadcast error
    pub fn broadcast(item_id: impl ToString, message: impl Into<String>) -> Self {
        Self::Broadcast {
            item_id: item_id.to_string(),
            message: message.into(),
        }
    }

    /// Create a scope not found error
    pub fn scope_not_found(kind: ScopeKind, id: impl ToString) -> Self {
        Self::ScopeNotFound {
            kind,
            id: id.to_string(),
        }
    }
}
