use crate::estimate::estimate_error::EstimateError;

/// distance-weighted k-nearest-neighbor regressor over a 2d feature
/// space under the L1 (manhattan) metric.
///
/// implemented directly rather than through a numeric library so the
/// weighting and tie-break rules are fixed here and reproducible:
/// neighbors are ranked by (distance, insertion order); weights are the
/// inverse distance; a query coinciding with one or more training
/// positions predicts the mean of the coincident targets.
pub struct KnnRegressor {
    k: usize,
    samples: Vec<([f64; 2], f64)>,
}

impl KnnRegressor {
    /// stores the training set after checking there are enough samples
    /// to rank k neighbors.
    pub fn fit(k: usize, samples: Vec<([f64; 2], f64)>) -> Result<KnnRegressor, EstimateError> {
        if k == 0 {
            return Err(EstimateError::ZeroNeighbors);
        }
        if samples.len() < k {
            return Err(EstimateError::InsufficientSamples {
                k,
                n: samples.len(),
            });
        }
        Ok(KnnRegressor { k, samples })
    }

    pub fn predict(&self, query: [f64; 2]) -> f64 {
        let mut ranked: Vec<(f64, f64)> = self
            .samples
            .iter()
            .map(|(position, target)| (manhattan(&query, position), *target))
            .collect();
        // stable sort keeps insertion order among equidistant samples
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        let nearest = &ranked[..self.k];

        let coincident: Vec<f64> = nearest
            .iter()
            .filter(|(distance, _)| *distance == 0.0)
            .map(|(_, target)| *target)
            .collect();
        if !coincident.is_empty() {
            return coincident.iter().sum::<f64>() / coincident.len() as f64;
        }

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for (distance, target) in nearest {
            let weight = 1.0 / distance;
            weighted_sum += weight * target;
            weight_total += weight;
        }
        weighted_sum / weight_total
    }
}

fn manhattan(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    (a[0] - b[0]).abs() + (a[1] - b[1]).abs()
}

#[cfg(test)]
mod test {
    use super::KnnRegressor;
    use crate::estimate::EstimateError;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_requires_k_samples() {
        let samples = vec![([0.0, 0.0], 1.0), ([1.0, 0.0], 2.0)];
        let result = KnnRegressor::fit(3, samples);
        assert!(matches!(
            result,
            Err(EstimateError::InsufficientSamples { k: 3, n: 2 })
        ));
    }

    #[test]
    fn test_fit_rejects_zero_neighbors() {
        let result = KnnRegressor::fit(0, vec![([0.0, 0.0], 1.0)]);
        assert!(matches!(result, Err(EstimateError::ZeroNeighbors)));
    }

    #[test]
    fn test_coincident_query_returns_target() {
        let samples = vec![([0.0, 0.0], 10.0), ([1.0, 0.0], 20.0), ([2.0, 0.0], 30.0)];
        let knn = KnnRegressor::fit(3, samples).expect("fit should succeed");
        assert_eq!(knn.predict([1.0, 0.0]), 20.0);
    }

    #[test]
    fn test_coincident_duplicates_average() {
        let samples = vec![([0.0, 0.0], 10.0), ([0.0, 0.0], 30.0), ([5.0, 0.0], 99.0)];
        let knn = KnnRegressor::fit(3, samples).expect("fit should succeed");
        assert_eq!(knn.predict([0.0, 0.0]), 20.0);
    }

    #[test]
    fn test_inverse_distance_weighting() {
        // query at x=1 with neighbors at 0, 2, 4: distances 1, 1, 3
        let samples = vec![([0.0, 0.0], 0.0), ([2.0, 0.0], 2.0), ([4.0, 0.0], 4.0)];
        let knn = KnnRegressor::fit(3, samples).expect("fit should succeed");
        let expected = (1.0 * 0.0 + 1.0 * 2.0 + (1.0 / 3.0) * 4.0) / (1.0 + 1.0 + 1.0 / 3.0);
        assert_relative_eq!(knn.predict([1.0, 0.0]), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_metric_is_manhattan() {
        // under L2 the nearest neighbor of the query would be the sample
        // at (1.1, 1.1) (euclidean 1.56 vs 1.6); under L1 it is the one
        // at (1.6, 0.0) (manhattan 1.6 vs 2.2)
        let samples = vec![
            ([1.6, 0.0], 1.0),
            ([1.1, 1.1], 2.0),
            ([50.0, 50.0], 3.0),
        ];
        let knn = KnnRegressor::fit(1, samples).expect("fit should succeed");
        assert_eq!(knn.predict([0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_prediction_within_target_range() {
        let samples = vec![([0.0, 0.0], 1.0), ([1.0, 1.0], 5.0), ([2.0, 2.0], 9.0)];
        let knn = KnnRegressor::fit(3, samples).expect("fit should succeed");
        let prediction = knn.predict([0.7, 0.7]);
        assert!(prediction > 1.0 && prediction < 9.0);
    }
}
