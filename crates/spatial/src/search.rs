/// Specification of how a neighborhood query is bounded.
///
/// Supplied per call and never mutated by the index. A query for a point
/// that is itself part of the index returns that point as one of its own
/// neighbors (at distance zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchParam {
    /// The `k` nearest points.
    Knn { k: usize },
    /// All points within `radius` (boundary inclusive).
    Radius { radius: f32 },
    /// The `k` nearest points, truncated to those within `radius`.
    Hybrid { k: usize, radius: f32 },
}

impl SearchParam {
    /// A parameter is usable when its neighbor count is at least one and its
    /// radius is finite and positive.
    pub fn is_valid(&self) -> bool {
        match *self {
            SearchParam::Knn { k } => k >= 1,
            SearchParam::Radius { radius } => radius.is_finite() && radius > 0.0,
            SearchParam::Hybrid { k, radius } => {
                k >= 1 && radius.is_finite() && radius > 0.0
            }
        }
    }
}

impl Default for SearchParam {
    /// 30 nearest neighbors, a reasonable default density for normal
    /// estimation on typical scans.
    fn default() -> Self {
        SearchParam::Knn { k: 30 }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchParam;

    #[test]
    fn default_is_knn_30() {
        assert_eq!(SearchParam::default(), SearchParam::Knn { k: 30 });
    }

    #[test]
    fn knn_requires_positive_k() {
        assert!(SearchParam::Knn { k: 1 }.is_valid());
        assert!(!SearchParam::Knn { k: 0 }.is_valid());
    }

    #[test]
    fn radius_must_be_finite_and_positive() {
        assert!(SearchParam::Radius { radius: 0.5 }.is_valid());
        assert!(!SearchParam::Radius { radius: 0.0 }.is_valid());
        assert!(!SearchParam::Radius { radius: -1.0 }.is_valid());
        assert!(!SearchParam::Radius {
            radius: f32::INFINITY
        }
        .is_valid());
        assert!(!SearchParam::Radius { radius: f32::NAN }.is_valid());
    }

    #[test]
    fn hybrid_checks_both_fields() {
        assert!(SearchParam::Hybrid { k: 5, radius: 1.0 }.is_valid());
        assert!(!SearchParam::Hybrid { k: 0, radius: 1.0 }.is_valid());
        assert!(!SearchParam::Hybrid { k: 5, radius: 0.0 }.is_valid());
    }
}
