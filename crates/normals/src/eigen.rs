//! Closed-form eigen-decomposition of 3x3 symmetric matrices.
//!
//! The inner loop of normal estimation needs one smallest-eigenvalue
//! eigenvector per point. A general iterative eigensolver (and its heap
//! allocations) is far more than that requires, so the eigenvalue comes from
//! Cardano's trigonometric formula and the eigenvector from the null space of
//! the shifted matrix.

/// Upper triangle of a 3x3 symmetric matrix:
///
/// ```text
/// | a00  a01  a02 |
/// | a01  a11  a12 |
/// | a02  a12  a22 |
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SymmetricMat3 {
    pub a00: f64,
    pub a01: f64,
    pub a02: f64,
    pub a11: f64,
    pub a12: f64,
    pub a22: f64,
}

/// Unit eigenvector for the smallest eigenvalue of `m`.
///
/// Returns `None` when the direction is not well defined: a (near-)zero or
/// isotropic matrix, or one whose smallest eigenvalue has a multi-dimensional
/// eigenspace (rank < 2 input, e.g. coincident or collinear points). Callers
/// decide the fallback; no arbitrary axis is invented here.
pub fn smallest_eigenvector(m: &SymmetricMat3) -> Option<[f32; 3]> {
    let SymmetricMat3 {
        a00,
        a01,
        a02,
        a11,
        a12,
        a22,
    } = *m;

    // Cardano: shift by the mean of the diagonal, then the eigenvalues of
    // B = A - mean*I follow from det(B) and the sum of squares of B.
    let mean = (a00 + a11 + a22) / 3.0;

    let b00 = a00 - mean;
    let b11 = a11 - mean;
    let b22 = a22 - mean;

    let q = (b00 * (b11 * b22 - a12 * a12) - a01 * (a01 * b22 - a12 * a02)
        + a02 * (a01 * a12 - b11 * a02))
        / 2.0;
    let p = (b00 * b00
        + b11 * b11
        + b22 * b22
        + 2.0 * (a01 * a01 + a02 * a02 + a12 * a12))
        / 6.0;
    let p = p.max(0.0);

    if p < 1e-30 {
        // Zero matrix or a scalar multiple of the identity: every direction
        // is an eigenvector.
        return None;
    }

    let ratio = (q / (p * p.sqrt())).clamp(-1.0, 1.0);
    let phi = ratio.acos() / 3.0;

    // Smallest of the three eigenvalues.
    let lambda = mean + 2.0 * p.sqrt() * (phi + 2.0 * std::f64::consts::FRAC_PI_3).cos();

    // (A - lambda*I) has rank <= 2; the cross product of two independent rows
    // spans its null space. Take the cross with the largest norm among the
    // three row pairs for numerical robustness.
    let rows = [
        [a00 - lambda, a01, a02],
        [a01, a11 - lambda, a12],
        [a02, a12, a22 - lambda],
    ];

    let mut best = [0.0f64; 3];
    let mut best_norm_sq = 0.0f64;
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        let c = cross(&rows[i], &rows[j]);
        let norm_sq = c[0] * c[0] + c[1] * c[1] + c[2] * c[2];
        if norm_sq > best_norm_sq {
            best_norm_sq = norm_sq;
            best = c;
        }
    }

    if best_norm_sq < 1e-30 {
        // All row pairs are (near-)parallel: the eigenspace is not a line.
        return None;
    }

    let inv = 1.0 / best_norm_sq.sqrt();
    Some([
        (best[0] * inv) as f32,
        (best[1] * inv) as f32,
        (best[2] * inv) as f32,
    ])
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
