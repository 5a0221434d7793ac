//! Error types for point cloud attribute mutations.

use thiserror::Error;

/// Errors raised when an attribute container cannot be attached to a cloud.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttributeError {
    /// Attribute length does not match the cloud's point count.
    #[error("attribute has {got} entries but the cloud has {expected} points")]
    LengthMismatch { expected: usize, got: usize },
}

/// Result type for attribute mutations.
pub type AttributeResult<T> = std::result::Result<T, AttributeError>;
