//! Rotation error types.

use thiserror::Error;

/// Errors that can occur while selecting from or mutating a rotation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("rotation has no entries")]
    Empty,
}

/// Coarse classification of a [`RotationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    InvalidOperation,
    EmptyCollection,
}

impl RotationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RotationError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RotationError::NotFound(_) => ErrorKind::NotFound,
            RotationError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            RotationError::Empty => ErrorKind::EmptyCollection,
        }
    }
}

pub type RotationResult<T> = Result<T, RotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            RotationError::InvalidArgument("x".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(RotationError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            RotationError::InvalidOperation("x".into()).kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(RotationError::Empty.kind(), ErrorKind::EmptyCollection);
    }

    #[test]
    fn display_includes_detail() {
        let err = RotationError::NotFound("anchor value".into());
        assert_eq!(err.to_string(), "not found: anchor value");
        assert_eq!(RotationError::Empty.to_string(), "rotation has no entries");
    }
}
