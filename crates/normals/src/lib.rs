#![forbid(unsafe_code)]

pub mod eigen;
pub mod error;
pub mod estimate;

pub use error::{NormalEstimationError, NormalEstimationResult};
pub use estimate::{estimate_normals, estimate_normals_with_reference};
