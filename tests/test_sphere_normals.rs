//! Accuracy test: estimated normals on a unit sphere against the analytic
//! surface normal.

use cumulus_core::{Normals, PointCloud};
use cumulus_normals::estimate_normals;
use cumulus_spatial::SearchParam;

/// Fibonacci-spiral sampling of the unit sphere: deterministic and close to
/// uniform, so every neighborhood is a well-conditioned spherical cap.
fn fibonacci_sphere(n: usize) -> PointCloud {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut z = Vec::with_capacity(n);
    for i in 0..n {
        let zi = 1.0 - 2.0 * (i as f32 + 0.5) / n as f32;
        let r = (1.0 - zi * zi).sqrt();
        let theta = golden_angle * i as f32;
        x.push(r * theta.cos());
        y.push(r * theta.sin());
        z.push(zi);
    }
    PointCloud::from_xyz(x, y, z)
}

#[test]
fn sphere_normals_match_analytic_radial_direction() {
    let mut cloud = fibonacci_sphere(1000);

    // Seed each point with its outward radial direction; on a unit sphere
    // that is the exact surface normal. Estimation then orients each result
    // against this per-point reference.
    let outward = Normals::from_xyz(
        cloud.xs().to_vec(),
        cloud.ys().to_vec(),
        cloud.zs().to_vec(),
    );
    cloud.set_normals(outward).unwrap();

    estimate_normals(&mut cloud, SearchParam::Knn { k: 30 }).unwrap();

    let mut angle_sum = 0.0f64;
    for i in 0..cloud.len() {
        let [nx, ny, nz] = cloud.normal(i).unwrap();
        let [px, py, pz] = cloud.point(i);
        // |p| = 1, so the dot with p is the cosine of the angular error.
        let dot = (nx * px + ny * py + nz * pz).clamp(-1.0, 1.0);
        assert!(
            dot >= 0.0,
            "normal at {i} flipped against its outward reference (dot = {dot})"
        );
        angle_sum += f64::from(dot.acos());
    }

    let mean_angle_deg = (angle_sum / cloud.len() as f64).to_degrees();
    assert!(
        mean_angle_deg < 5.0,
        "mean angular error {mean_angle_deg:.2} degrees exceeds 5 degrees"
    );
}

#[test]
fn sphere_normals_without_reference_are_unit_and_finite() {
    let mut cloud = fibonacci_sphere(500);
    estimate_normals(&mut cloud, SearchParam::Knn { k: 30 }).unwrap();

    for i in 0..cloud.len() {
        let [nx, ny, nz] = cloud.normal(i).unwrap();
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        assert!(len.is_finite());
        assert!((len - 1.0).abs() < 1e-4, "normal {i} has length {len}");
    }
}
