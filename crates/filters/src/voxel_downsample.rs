use hashbrown::HashMap;
use tracing::debug;

use cumulus_core::{Colors, Normals, PointCloud};

use crate::error::{DownsampleError, DownsampleResult};

/// Running sums for one occupied voxel.
#[derive(Default, Clone)]
struct VoxelAccum {
    pos: [f32; 3],
    normal: [f32; 3],
    color: [f32; 3],
    n: usize,
}

impl VoxelAccum {
    fn mean_of(sum: &[f32; 3], n: usize) -> [f32; 3] {
        let denom = n as f32;
        [sum[0] / denom, sum[1] / denom, sum[2] / denom]
    }
}

/// Reduce point density by averaging all points that fall into the same cell
/// of a uniform grid with edge length `voxel_size`.
///
/// One output point is emitted per occupied voxel, at the arithmetic mean of
/// the member positions. If the input carries normals or colors, the output
/// carries the per-voxel mean of those too; averaged normals are NOT
/// renormalized (call `normalize_normals` on the result when unit length is
/// needed). Points with a non-finite coordinate are skipped.
///
/// Output points are ordered by ascending voxel key (lexicographic over the
/// integer grid coordinates), so the result is deterministic regardless of
/// input order.
///
/// The input cloud is never mutated. `output.len() <= input.len()`, with
/// equality exactly when every input point occupies its own voxel; running
/// the filter again on its own output with the same size is a no-op.
pub fn voxel_downsample(cloud: &PointCloud, voxel_size: f32) -> DownsampleResult<PointCloud> {
    if !(voxel_size.is_finite() && voxel_size > 0.0) {
        return Err(DownsampleError::InvalidVoxelSize(voxel_size));
    }
    if !cloud.has_points() {
        return Err(DownsampleError::EmptyCloud);
    }

    let normals = if cloud.has_normals() {
        cloud.normals()
    } else {
        None
    };
    let colors = if cloud.has_colors() {
        cloud.colors()
    } else {
        None
    };

    let mut bins: HashMap<(i32, i32, i32), VoxelAccum> = HashMap::new();

    for i in 0..cloud.len() {
        let [px, py, pz] = cloud.point(i);
        if !(px.is_finite() && py.is_finite() && pz.is_finite()) {
            continue;
        }

        let key = (
            (px / voxel_size).floor() as i32,
            (py / voxel_size).floor() as i32,
            (pz / voxel_size).floor() as i32,
        );

        let a = bins.entry(key).or_default();
        a.pos[0] += px;
        a.pos[1] += py;
        a.pos[2] += pz;
        if let Some(ns) = normals {
            a.normal[0] += ns.nx[i];
            a.normal[1] += ns.ny[i];
            a.normal[2] += ns.nz[i];
        }
        if let Some(cs) = colors {
            a.color[0] += cs.r[i];
            a.color[1] += cs.g[i];
            a.color[2] += cs.b[i];
        }
        a.n += 1;
    }

    let mut keys: Vec<(i32, i32, i32)> = bins.keys().copied().collect();
    keys.sort_unstable();

    debug!(
        "voxel downsample: {} points into {} voxels (size {})",
        cloud.len(),
        keys.len(),
        voxel_size
    );

    let mut x = Vec::with_capacity(keys.len());
    let mut y = Vec::with_capacity(keys.len());
    let mut z = Vec::with_capacity(keys.len());
    let mut out_normals = normals.map(|_| Normals::with_capacity(keys.len()));
    let mut out_colors = colors.map(|_| Colors::with_capacity(keys.len()));

    for key in keys {
        let a = &bins[&key];
        let [mx, my, mz] = VoxelAccum::mean_of(&a.pos, a.n);
        x.push(mx);
        y.push(my);
        z.push(mz);
        if let Some(ns) = &mut out_normals {
            ns.push(VoxelAccum::mean_of(&a.normal, a.n));
        }
        if let Some(cs) = &mut out_colors {
            cs.push(VoxelAccum::mean_of(&a.color, a.n));
        }
    }

    let mut out = PointCloud::from_xyz(x, y, z);
    if let Some(ns) = out_normals {
        out.set_normals(ns)
            .expect("one normal accumulated per emitted voxel");
    }
    if let Some(cs) = out_colors {
        out.set_colors(cs)
            .expect("one color accumulated per emitted voxel");
    }
    Ok(out)
}
