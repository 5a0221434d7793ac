use rayon::prelude::*;
use tracing::debug;

use cumulus_core::{Normals, PointCloud};
use cumulus_spatial::{KdTree, SearchParam};

use crate::eigen::{smallest_eigenvector, SymmetricMat3};
use crate::error::{NormalEstimationError, NormalEstimationResult};

/// Orientation reference used when the cloud has no normal to agree with.
const DEFAULT_REFERENCE: [f32; 3] = [0.0, 0.0, 1.0];

/// Estimate one surface normal per point by local principal-component
/// analysis, writing the result into the cloud's normal attribute.
///
/// For each point, the neighborhood selected by `search` (which includes the
/// point itself) is fitted with a plane: the eigenvector of the smallest
/// eigenvalue of the neighborhood covariance is the normal candidate. The
/// candidate's sign is chosen to agree with the cloud's existing normal at
/// that point when one exists, and with `+Z` otherwise. Orientation is
/// strictly per point; no consistency is propagated across neighbors, so a
/// closed surface estimated without prior normals will not come out globally
/// consistent.
///
/// Degenerate neighborhoods (fewer than 3 members, coincident or collinear
/// points) keep the pre-existing normal if the cloud had one, and get the
/// orientation reference otherwise; they never produce NaN and never fail
/// the call.
///
/// The per-point loop runs in parallel; the spatial index is built once
/// before the loop and only read afterwards.
pub fn estimate_normals(
    cloud: &mut PointCloud,
    search: SearchParam,
) -> NormalEstimationResult<()> {
    estimate(cloud, None, search)
}

/// Like [`estimate_normals`], but every normal is oriented to agree with
/// `reference`, ignoring any pre-existing normals.
pub fn estimate_normals_with_reference(
    cloud: &mut PointCloud,
    reference: [f32; 3],
    search: SearchParam,
) -> NormalEstimationResult<()> {
    estimate(cloud, Some(reference), search)
}

fn estimate(
    cloud: &mut PointCloud,
    reference: Option<[f32; 3]>,
    search: SearchParam,
) -> NormalEstimationResult<()> {
    if !cloud.has_points() {
        return Err(NormalEstimationError::EmptyCloud);
    }
    if !search.is_valid() {
        return Err(NormalEstimationError::InvalidSearchParam(search));
    }

    let tree = KdTree::build(cloud);
    let n = cloud.len();
    let points: Vec<[f32; 3]> = cloud.iter_points().collect();
    // Snapshot of the normals present before estimation: the first entry
    // point orients against these, and the fallback policy retains them.
    let prior = if cloud.has_normals() {
        cloud.normals().cloned()
    } else {
        None
    };

    let results: Vec<([f32; 3], bool)> = points
        .par_iter()
        .enumerate()
        .map(|(i, point)| {
            let reference_vec = match reference {
                Some(r) => r,
                None => prior
                    .as_ref()
                    .map(|p| p.get(i))
                    .unwrap_or(DEFAULT_REFERENCE),
            };
            let fallback = || match &prior {
                Some(p) => (p.get(i), true),
                None => (unit_or_default(reference_vec), true),
            };

            let neighbors = tree.search(point, &search);
            if neighbors.len() < 3 {
                return fallback();
            }

            let cov = neighborhood_covariance(&points, &neighbors);
            match smallest_eigenvector(&cov) {
                None => fallback(),
                Some(mut normal) => {
                    let dot = normal[0] * reference_vec[0]
                        + normal[1] * reference_vec[1]
                        + normal[2] * reference_vec[2];
                    if dot < 0.0 {
                        normal = [-normal[0], -normal[1], -normal[2]];
                    }
                    (normal, false)
                }
            }
        })
        .collect();

    let degenerate = results.iter().filter(|(_, fell_back)| *fell_back).count();
    if degenerate > 0 {
        debug!(
            "normal estimation: {} of {} neighborhoods degenerate, fallback applied",
            degenerate, n
        );
    }

    let mut normals = Normals::with_capacity(n);
    for (normal, _) in &results {
        normals.push(*normal);
    }
    cloud
        .set_normals(normals)
        .expect("one normal computed per point");
    Ok(())
}

/// Sample covariance of the neighborhood positions, mean-centered and divided
/// by the neighbor count. Accumulated in f64; f32 sums lose too much to
/// cancellation on clouds far from the origin.
fn neighborhood_covariance(points: &[[f32; 3]], neighbors: &[usize]) -> SymmetricMat3 {
    let count = neighbors.len() as f64;

    let mut cx = 0.0f64;
    let mut cy = 0.0f64;
    let mut cz = 0.0f64;
    for &idx in neighbors {
        cx += points[idx][0] as f64;
        cy += points[idx][1] as f64;
        cz += points[idx][2] as f64;
    }
    cx /= count;
    cy /= count;
    cz /= count;

    let mut cov = SymmetricMat3::default();
    for &idx in neighbors {
        let dx = points[idx][0] as f64 - cx;
        let dy = points[idx][1] as f64 - cy;
        let dz = points[idx][2] as f64 - cz;
        cov.a00 += dx * dx;
        cov.a01 += dx * dy;
        cov.a02 += dx * dz;
        cov.a11 += dy * dy;
        cov.a12 += dy * dz;
        cov.a22 += dz * dz;
    }
    cov.a00 /= count;
    cov.a01 /= count;
    cov.a02 /= count;
    cov.a11 /= count;
    cov.a12 /= count;
    cov.a22 /= count;
    cov
}

fn unit_or_default(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 && len.is_finite() {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        DEFAULT_REFERENCE
    }
}
