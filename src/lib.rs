#![forbid(unsafe_code)]

//! Point cloud geometry core.
//!
//! Umbrella crate re-exporting the public surface of the member crates:
//! the [`PointCloud`] container, spatial queries ([`KdTree`], [`SearchParam`]),
//! voxel-grid downsampling ([`voxel_downsample`]) and PCA normal estimation
//! ([`estimate_normals`]).

pub use cumulus_core::{
    Aabb, AttributeError, Boundable, Clearable, Colors, Normals, PointCloud, Transformable,
};
pub use cumulus_filters::{voxel_downsample, DownsampleError};
pub use cumulus_normals::{
    estimate_normals, estimate_normals_with_reference, NormalEstimationError,
};
pub use cumulus_spatial::{KdTree, SearchParam};
