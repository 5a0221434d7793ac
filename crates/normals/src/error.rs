//! Error types for normal estimation.

use cumulus_spatial::SearchParam;
use thiserror::Error;

/// Errors that fail an entire estimation call before any mutation.
///
/// Per-point degeneracies (too few neighbors, rank-deficient covariance) are
/// not errors; they are resolved by the documented fallback policy.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum NormalEstimationError {
    /// Input cloud has no points.
    #[error("input cloud has no points")]
    EmptyCloud,

    /// Search parameter has k = 0 or a non-positive/non-finite radius.
    #[error("invalid search parameter: {0:?}")]
    InvalidSearchParam(SearchParam),
}

/// Result type for normal estimation.
pub type NormalEstimationResult<T> = std::result::Result<T, NormalEstimationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_param() {
        let err = NormalEstimationError::InvalidSearchParam(SearchParam::Knn { k: 0 });
        assert!(format!("{err}").contains("Knn"));
    }
}
