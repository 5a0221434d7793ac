use kiddo::float::distance::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use std::num::NonZero;

use cumulus_core::PointCloud;
use crate::search::SearchParam;

/// Spatial index over a point cloud's positions.
///
/// Wraps kiddo's `ImmutableKdTree`, which builds a balanced, cache-optimized
/// tree in one pass. The tree is built once over a snapshot of the positions
/// and is read-only afterwards, so concurrent queries from multiple threads
/// are safe. Stored items are `u32` indices into the source cloud.
#[derive(Debug, Clone)]
pub struct KdTree {
    tree: ImmutableKdTree<f32, u32, 3, 32>,
    num_points: usize,
}

impl KdTree {
    pub fn build(cloud: &PointCloud) -> Self {
        let n = cloud.len();
        if n == 0 {
            return Self {
                tree: ImmutableKdTree::new_from_slice(&[]),
                num_points: 0,
            };
        }

        let points: Vec<[f32; 3]> = cloud.iter_points().collect();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            num_points: n,
        }
    }

    pub fn len(&self) -> usize {
        self.num_points
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Run a query described by `param` and return the matching indices.
    ///
    /// KNN results come back in ascending distance order, radius results in
    /// ascending index order, and hybrid results are the k nearest truncated
    /// to those within the radius. Unusable parameters (k = 0, bad radius)
    /// yield an empty result; callers that need a hard error validate the
    /// parameter before querying.
    pub fn search(&self, query: &[f32; 3], param: &SearchParam) -> Vec<usize> {
        match *param {
            SearchParam::Knn { k } => self.knn_indices(query, k),
            SearchParam::Radius { radius } => self.radius_search(query, radius),
            SearchParam::Hybrid { k, radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Vec::new();
                }
                let (indices, distances) = self.knn(query, k);
                indices
                    .into_iter()
                    .zip(distances)
                    .take_while(|&(_, d)| d <= radius)
                    .map(|(i, _)| i)
                    .collect()
            }
        }
    }

    /// Find the `k` nearest neighbors to `query`.
    ///
    /// Returns `(indices, distances)` with Euclidean (not squared) distances
    /// in ascending order. Empty when `k == 0`, the tree is empty, or the
    /// query has a non-finite coordinate; all points when `k > len()`.
    pub fn knn(&self, query: &[f32; 3], k: usize) -> (Vec<usize>, Vec<f32>) {
        let Some(k) = self.usable_k(query, k) else {
            return (Vec::new(), Vec::new());
        };

        let results = self.tree.nearest_n::<SquaredEuclidean>(query, k);

        let mut indices = Vec::with_capacity(results.len());
        let mut distances = Vec::with_capacity(results.len());
        for nn in results {
            indices.push(nn.item as usize);
            distances.push(nn.distance.sqrt());
        }
        (indices, distances)
    }

    /// Like [`knn`](Self::knn) but skips the sqrt and the distance vector
    /// when only indices are needed.
    pub fn knn_indices(&self, query: &[f32; 3], k: usize) -> Vec<usize> {
        let Some(k) = self.usable_k(query, k) else {
            return Vec::new();
        };

        self.tree
            .nearest_n::<SquaredEuclidean>(query, k)
            .iter()
            .map(|nn| nn.item as usize)
            .collect()
    }

    /// Find all points with Euclidean distance `<= radius` from `query`,
    /// in ascending index order.
    pub fn radius_search(&self, query: &[f32; 3], radius: f32) -> Vec<usize> {
        if self.is_empty()
            || !(radius.is_finite() && radius > 0.0)
            || !query.iter().all(|v| v.is_finite())
        {
            return Vec::new();
        }

        let radius_sq = radius * radius;

        // kiddo's within_unsorted uses strict `<`; pad the query radius by an
        // epsilon and post-filter with `<=` so boundary points are included.
        let padded = radius_sq + f32::EPSILON * radius_sq.max(1.0);

        let mut indices: Vec<usize> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(query, padded)
            .into_iter()
            .filter(|nn| nn.distance <= radius_sq)
            .map(|nn| nn.item as usize)
            .collect();

        indices.sort_unstable();
        indices
    }

    fn usable_k(&self, query: &[f32; 3], k: usize) -> Option<NonZero<usize>> {
        if self.is_empty() || !query.iter().all(|v| v.is_finite()) {
            return None;
        }
        NonZero::new(k)
    }
}
