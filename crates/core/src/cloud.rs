use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

use crate::error::{AttributeError, AttributeResult};
use crate::traits::{Boundable, Clearable, Transformable};
use crate::Aabb;

/// Per-point unit (or to-be-normalized) direction vectors, stored SoA.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normals {
    pub nx: Vec<f32>,
    pub ny: Vec<f32>,
    pub nz: Vec<f32>,
}

impl Normals {
    pub fn from_xyz(nx: Vec<f32>, ny: Vec<f32>, nz: Vec<f32>) -> Self {
        assert_eq!(nx.len(), ny.len(), "nx and ny must have same length");
        assert_eq!(nx.len(), nz.len(), "nx and nz must have same length");
        Self { nx, ny, nz }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            nx: Vec::with_capacity(n),
            ny: Vec::with_capacity(n),
            nz: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.nx.len(), self.ny.len());
        debug_assert_eq!(self.nx.len(), self.nz.len());
        self.nx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nx.is_empty()
    }

    pub fn get(&self, i: usize) -> [f32; 3] {
        [self.nx[i], self.ny[i], self.nz[i]]
    }

    pub fn push(&mut self, n: [f32; 3]) {
        self.nx.push(n[0]);
        self.ny.push(n[1]);
        self.nz.push(n[2]);
    }
}

/// Per-point real-valued color channels, stored SoA.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Colors {
    pub r: Vec<f32>,
    pub g: Vec<f32>,
    pub b: Vec<f32>,
}

impl Colors {
    pub fn from_rgb(r: Vec<f32>, g: Vec<f32>, b: Vec<f32>) -> Self {
        assert_eq!(r.len(), g.len(), "r and g must have same length");
        assert_eq!(r.len(), b.len(), "r and b must have same length");
        Self { r, g, b }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            r: Vec::with_capacity(n),
            g: Vec::with_capacity(n),
            b: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.r.len(), self.g.len());
        debug_assert_eq!(self.r.len(), self.b.len());
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn get(&self, i: usize) -> [f32; 3] {
        [self.r[i], self.g[i], self.b[i]]
    }

    pub fn push(&mut self, c: [f32; 3]) {
        self.r.push(c[0]);
        self.g.push(c[1]);
        self.b.push(c[2]);
    }
}

/// An unordered set of 3D points with optional per-point normals and colors.
///
/// Positions are mandatory; normals and colors are all-or-nothing: they are
/// considered present only while their length matches the point count. All
/// mutation goes through methods that keep the length agreement intact, so a
/// cloud can never end up with a half-populated attribute.
///
/// Clouds are grown or replaced wholesale by producers (downsampling, normal
/// estimation, concatenation), not point by point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    x: Vec<f32>,
    y: Vec<f32>,
    z: Vec<f32>,
    normals: Option<Normals>,
    colors: Option<Colors>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");
        Self {
            x,
            y,
            z,
            normals: None,
            colors: None,
        }
    }

    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut x = Vec::with_capacity(points.len());
        let mut y = Vec::with_capacity(points.len());
        let mut z = Vec::with_capacity(points.len());
        for p in points {
            x.push(p[0]);
            y.push(p[1]);
            z.push(p[2]);
        }
        Self::from_xyz(x, y, z)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn has_points(&self) -> bool {
        !self.is_empty()
    }

    /// True when every point carries a normal.
    pub fn has_normals(&self) -> bool {
        self.has_points()
            && self
                .normals
                .as_ref()
                .is_some_and(|n| n.len() == self.len())
    }

    /// True when every point carries a color.
    pub fn has_colors(&self) -> bool {
        self.has_points()
            && self
                .colors
                .as_ref()
                .is_some_and(|c| c.len() == self.len())
    }

    pub fn xs(&self) -> &[f32] {
        &self.x
    }

    pub fn ys(&self) -> &[f32] {
        &self.y
    }

    pub fn zs(&self) -> &[f32] {
        &self.z
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn normal(&self, i: usize) -> Option<[f32; 3]> {
        self.normals.as_ref().map(|n| n.get(i))
    }

    pub fn color(&self, i: usize) -> Option<[f32; 3]> {
        self.colors.as_ref().map(|c| c.get(i))
    }

    pub fn normals(&self) -> Option<&Normals> {
        self.normals.as_ref()
    }

    pub fn colors(&self) -> Option<&Colors> {
        self.colors.as_ref()
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Attach one normal per point. Fails if any channel length disagrees
    /// with the point count; the cloud is left unchanged on failure.
    pub fn set_normals(&mut self, normals: Normals) -> AttributeResult<()> {
        let expected = self.len();
        for got in [normals.nx.len(), normals.ny.len(), normals.nz.len()] {
            if got != expected {
                return Err(AttributeError::LengthMismatch { expected, got });
            }
        }
        self.normals = Some(normals);
        Ok(())
    }

    /// Attach one color per point. Fails if any channel length disagrees
    /// with the point count; the cloud is left unchanged on failure.
    pub fn set_colors(&mut self, colors: Colors) -> AttributeResult<()> {
        let expected = self.len();
        for got in [colors.r.len(), colors.g.len(), colors.b.len()] {
            if got != expected {
                return Err(AttributeError::LengthMismatch { expected, got });
            }
        }
        self.colors = Some(colors);
        Ok(())
    }

    pub fn take_normals(&mut self) -> Option<Normals> {
        self.normals.take()
    }

    pub fn take_colors(&mut self) -> Option<Colors> {
        self.colors.take()
    }

    /// Discard all points and attributes.
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
        self.normals = None;
        self.colors = None;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.iter_points())
    }

    /// Componentwise minimum position. Returns `[0.0; 3]` when the cloud is
    /// empty (or holds no finite point); check `has_points` first when zero
    /// is a legitimate bound.
    pub fn min_bound(&self) -> [f32; 3] {
        let aabb = self.aabb();
        if aabb.is_empty() {
            [0.0; 3]
        } else {
            aabb.min
        }
    }

    /// Componentwise maximum position, `[0.0; 3]` when empty.
    pub fn max_bound(&self) -> [f32; 3] {
        let aabb = self.aabb();
        if aabb.is_empty() {
            [0.0; 3]
        } else {
            aabb.max
        }
    }

    /// Append all points of `other` to `self`.
    ///
    /// Optional attributes survive the union only when both sides carry them
    /// (or when `self` was empty and adopts `other`'s attributes); otherwise
    /// the attribute is dropped so it never covers a subset of points.
    pub fn extend_from(&mut self, other: &PointCloud) {
        if other.is_empty() {
            return;
        }

        let keep_normals = (!self.has_points() || self.has_normals()) && other.has_normals();
        let keep_colors = (!self.has_points() || self.has_colors()) && other.has_colors();

        if keep_normals {
            if let Some(theirs) = &other.normals {
                let ours = self.normals.get_or_insert_with(Normals::default);
                ours.nx.extend_from_slice(&theirs.nx);
                ours.ny.extend_from_slice(&theirs.ny);
                ours.nz.extend_from_slice(&theirs.nz);
            }
        } else {
            self.normals = None;
        }

        if keep_colors {
            if let Some(theirs) = &other.colors {
                let ours = self.colors.get_or_insert_with(Colors::default);
                ours.r.extend_from_slice(&theirs.r);
                ours.g.extend_from_slice(&theirs.g);
                ours.b.extend_from_slice(&theirs.b);
            }
        } else {
            self.colors = None;
        }

        self.x.extend_from_slice(&other.x);
        self.y.extend_from_slice(&other.y);
        self.z.extend_from_slice(&other.z);
    }

    /// Union of two clouds, with the attribute rules of [`extend_from`].
    pub fn concat(a: &PointCloud, b: &PointCloud) -> PointCloud {
        let mut out = a.clone();
        out.extend_from(b);
        out
    }

    /// Rescale every normal to unit length. Zero-length normals are left
    /// untouched rather than divided by zero.
    pub fn normalize_normals(&mut self) {
        if let Some(n) = &mut self.normals {
            for i in 0..n.len() {
                let len =
                    (n.nx[i] * n.nx[i] + n.ny[i] * n.ny[i] + n.nz[i] * n.nz[i]).sqrt();
                if len > 0.0 {
                    n.nx[i] /= len;
                    n.ny[i] /= len;
                    n.nz[i] /= len;
                }
            }
        }
    }

    /// Apply a 4x4 homogeneous transform to all positions. Normals are
    /// rotated by the linear part only; translation does not apply to
    /// directions.
    pub fn transform(&mut self, m: &Matrix4<f32>) {
        for i in 0..self.x.len() {
            let p = m * Vector4::new(self.x[i], self.y[i], self.z[i], 1.0);
            self.x[i] = p.x;
            self.y[i] = p.y;
            self.z[i] = p.z;
        }

        if let Some(n) = &mut self.normals {
            let linear: Matrix3<f32> = m.fixed_view::<3, 3>(0, 0).into_owned();
            for i in 0..n.len() {
                let v = linear * Vector3::new(n.nx[i], n.ny[i], n.nz[i]);
                n.nx[i] = v.x;
                n.ny[i] = v.y;
                n.nz[i] = v.z;
            }
        }
    }
}

impl Boundable for PointCloud {
    fn min_bound(&self) -> [f32; 3] {
        PointCloud::min_bound(self)
    }

    fn max_bound(&self) -> [f32; 3] {
        PointCloud::max_bound(self)
    }
}

impl Clearable for PointCloud {
    fn clear(&mut self) {
        PointCloud::clear(self)
    }

    fn is_empty(&self) -> bool {
        PointCloud::is_empty(self)
    }
}

impl Transformable for PointCloud {
    fn transform(&mut self, m: &Matrix4<f32>) {
        PointCloud::transform(self, m)
    }
}
