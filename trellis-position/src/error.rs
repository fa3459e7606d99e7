//! Error types for position handling

use thiserror::Error;

/// Result type for position operations
pub type Result<T> = std::result::Result<T, PositionError>;

/// Errors raised by validating constructors.
///
/// The reconciler itself never fails; these only come from building
/// spacings and snapshots out of untrusted input.
#[derive(Debug, Error, PartialEq)]
pub enum PositionError {
    /// Spacing must be strictly positive
    #[error("spacing must be positive, got {value}")]
    InvalidSpacing { value: String },

    /// Snapshot is not sorted ascending by position
    #[error("siblings are not sorted: '{id}' at {position} follows {previous}")]
    Unsorted {
        id: String,
        position: String,
        previous: String,
    },

    /// Two siblings share one position
    #[error("duplicate position {position} for '{first}' and '{second}'")]
    DuplicatePosition {
        position: String,
        first: String,
        second: String,
    },

    /// Two siblings share one id
    #[error("duplicate item ID: {id}")]
    DuplicateId { id: String },

    /// Position text could not be parsed
    #[error("invalid position '{value}': {message}")]
    Parse { value: String, message: String },
}

impl PositionError {
    /// Create an invalid spacing error
    pub fn invalid_spacing(value: impl ToString) -> Self {
        Self::InvalidSpacing {
            value: value.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse(value: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            value: value.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PositionError::DuplicateId { id: "card-1".into() };
        assert_eq!(err.to_string(), "duplicate item ID: card-1");
    }

    #[test]
    fn test_invalid_spacing() {
        let err = PositionError::invalid_spacing(-5);
        assert_eq!(err.to_string(), "spacing must be positive, got -5");
    }

    #[test]
    fn test_unsorted_display() {
        let err = PositionError::Unsorted {
            id: "b".into(),
            position: "10".into(),
            previous: "20".into(),
        };
        assert!(err.to_string().contains("'b' at 10 follows 20"));
    }
}
