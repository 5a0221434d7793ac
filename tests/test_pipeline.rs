use cumulus_core::{Colors, PointCloud};
use cumulus_filters::voxel_downsample;
use cumulus_normals::estimate_normals;
use cumulus_spatial::SearchParam;
use nalgebra::{Matrix4, Vector3};

/// End-to-end pipeline: build a scene, downsample, estimate normals,
/// transform.
#[test]
fn pipeline_downsample_then_estimate_normals() {
    // Synthetic scene: a dense ground patch at z ~ 0.
    // Small z variation avoids kiddo bucket overflow on coplanar points.
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();
    for i in 0..40 {
        for j in 0..40 {
            x.push(i as f32 * 0.05);
            y.push(j as f32 * 0.05);
            z.push((i * 40 + j) as f32 * 1e-6);
        }
    }
    let cloud = PointCloud::from_xyz(x, y, z);
    assert_eq!(cloud.len(), 1600);

    // Step 1: voxel downsample to a coarser grid.
    let mut sparse = voxel_downsample(&cloud, 0.15).unwrap();
    assert!(sparse.len() > 0);
    assert!(sparse.len() < cloud.len());

    // Step 2: estimate normals on the reduced cloud.
    estimate_normals(&mut sparse, SearchParam::Knn { k: 8 }).unwrap();
    assert!(sparse.has_normals());

    // For a flat patch, normals are approximately (0, 0, 1): the +Z
    // tie-break picks the positive sign.
    for i in 0..sparse.len() {
        let [_, _, nz] = sparse.normal(i).unwrap();
        assert!(nz > 0.9, "normal z at {i} is {nz} (expected ~1.0)");
    }

    // Step 3: a rigid transform moves the bounds and rotates the normals.
    let before_max = sparse.max_bound();
    let m = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 10.0));
    sparse.transform(&m);
    assert!((sparse.max_bound()[2] - (before_max[2] + 10.0)).abs() < 1e-4);
    // Pure translation leaves normals untouched.
    assert!(sparse.normal(0).unwrap()[2] > 0.9);
}

#[test]
fn pipeline_preserves_attributes_through_downsampling() {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();
    for i in 0..100 {
        x.push((i % 10) as f32 * 0.01);
        y.push((i / 10) as f32 * 0.01);
        z.push(i as f32 * 1e-6);
    }
    let n = x.len();
    let mut cloud = PointCloud::from_xyz(x, y, z);
    cloud
        .set_colors(Colors::from_rgb(
            vec![0.25; n],
            vec![0.5; n],
            vec![0.75; n],
        ))
        .unwrap();

    // All 100 points fall into one voxel; the mean color is the common color.
    let sparse = voxel_downsample(&cloud, 1.0).unwrap();
    assert_eq!(sparse.len(), 1);
    assert!(sparse.has_colors());
    let [r, g, b] = sparse.color(0).unwrap();
    assert!((r - 0.25).abs() < 1e-5);
    assert!((g - 0.5).abs() < 1e-5);
    assert!((b - 0.75).abs() < 1e-5);

    // The input had no normals, so neither does the output.
    assert!(!sparse.has_normals());
}

#[test]
fn downsample_then_normalize_normals_gives_unit_length() {
    // Two points in one voxel with orthogonal unit normals: the downsampled
    // mean normal is shorter than unit until explicitly renormalized.
    let mut cloud = PointCloud::from_xyz(vec![0.2, 0.3], vec![0.2; 2], vec![0.2; 2]);
    cloud
        .set_normals(cumulus_core::Normals::from_xyz(
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ))
        .unwrap();

    let mut sparse = voxel_downsample(&cloud, 1.0).unwrap();
    let [nx, ny, nz] = sparse.normal(0).unwrap();
    let mean_len = (nx * nx + ny * ny + nz * nz).sqrt();
    assert!(mean_len < 0.99);

    sparse.normalize_normals();
    let [nx, ny, nz] = sparse.normal(0).unwrap();
    let unit_len = (nx * nx + ny * ny + nz * nz).sqrt();
    assert!((unit_len - 1.0).abs() < 1e-5);
}
