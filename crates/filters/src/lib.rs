#![forbid(unsafe_code)]

pub mod error;
pub mod voxel_downsample;

pub use error::{DownsampleError, DownsampleResult};
pub use voxel_downsample::voxel_downsample;
