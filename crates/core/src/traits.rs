//! Capability traits implemented by geometric containers.
//!
//! Rather than a single geometry base type, each geometric ability is its own
//! narrow trait so consumers can require exactly what they use.

use nalgebra::Matrix4;

/// Types with an axis-aligned spatial extent.
pub trait Boundable {
    /// Componentwise minimum over all positions, `[0.0; 3]` when empty.
    fn min_bound(&self) -> [f32; 3];

    /// Componentwise maximum over all positions, `[0.0; 3]` when empty.
    fn max_bound(&self) -> [f32; 3];
}

/// Types whose contents can be discarded wholesale.
pub trait Clearable {
    fn clear(&mut self);

    fn is_empty(&self) -> bool;
}

/// Types that can be mapped through a 4x4 homogeneous transform.
pub trait Transformable {
    /// Apply `m` to all positions. Direction attributes (normals) are rotated
    /// by the linear part of `m` only, without translation.
    fn transform(&mut self, m: &Matrix4<f32>);
}
