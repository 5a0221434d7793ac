//! Error types for downsampling operations.

use thiserror::Error;

/// Errors that can occur during voxel-grid downsampling.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DownsampleError {
    /// Input cloud has no points.
    #[error("input cloud has no points")]
    EmptyCloud,

    /// Voxel size must be finite and strictly positive.
    #[error("invalid voxel size: {0} (must be finite and > 0)")]
    InvalidVoxelSize(f32),
}

/// Result type for downsampling operations.
pub type DownsampleResult<T> = std::result::Result<T, DownsampleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            format!("{}", DownsampleError::EmptyCloud),
            "input cloud has no points"
        );
        assert!(format!("{}", DownsampleError::InvalidVoxelSize(-0.5)).contains("-0.5"));
    }
}
