//! Density-based detector: local outlier factor, simplified to the
//! k-distance ratio form. A row far from its neighborhood relative to
//! how tightly that neighborhood packs together scores high.

use crate::core::Dataset;
use crate::detector::knn::mean_knn_distance;
use crate::detector::model::AnomalyDetector;
use crate::detector::stats;
use crate::error::DetectorError;

pub const DEFAULT_NEIGHBORS: usize = 10;

struct LofModel {
    train: Vec<Vec<f64>>,
    /// Mean k-distance of each training row (self excluded).
    train_kdist: Vec<f64>,
    offset: f64,
}

/// Simplified local outlier factor.
pub struct Lof {
    contamination: f64,
    n_neighbors: usize,
    fitted: Option<LofModel>,
}

impl Lof {
    pub fn new(contamination: f64, n_neighbors: usize) -> Self {
        Lof {
            contamination,
            n_neighbors: n_neighbors.max(1),
            fitted: None,
        }
    }

    /// k-distance of `row` divided by the mean k-distance of its k
    /// nearest training rows. Ratios near 1 mean the row sits in a
    /// neighborhood of comparable density.
    fn factor(&self, row: &[f64], train: &[Vec<f64>], kdist: &[f64], skip: Option<usize>) -> f64 {
        let own = mean_knn_distance(row, train, self.n_neighbors, skip);

        let mut order: Vec<usize> = (0..train.len()).filter(|&i| Some(i) != skip).collect();
        order.sort_by(|&a, &b| {
            stats::squared_distance(row, &train[a])
                .partial_cmp(&stats::squared_distance(row, &train[b]))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let k = self.n_neighbors.min(order.len());
        if k == 0 {
            return 0.0;
        }
        let neighborhood: f64 = order[..k].iter().map(|&i| kdist[i]).sum::<f64>() / k as f64;
        if neighborhood < f64::EPSILON {
            // Perfectly dense neighborhood: any positive own-distance
            // is infinitely anomalous, zero is perfectly normal
            return if own < f64::EPSILON { 1.0 } else { f64::MAX.sqrt() };
        }
        own / neighborhood
    }
}

impl AnomalyDetector for Lof {
    fn fit(&mut self, data: &Dataset) {
        let train = data.rows().to_vec();
        let train_kdist: Vec<f64> = train
            .iter()
            .enumerate()
            .map(|(i, row)| mean_knn_distance(row, &train, self.n_neighbors, Some(i)))
            .collect();
        let factors: Vec<f64> = train
            .iter()
            .enumerate()
            .map(|(i, row)| self.factor(row, &train, &train_kdist, Some(i)))
            .collect();
        let offset = stats::contamination_offset(&factors, self.contamination);
        self.fitted = Some(LofModel {
            train,
            train_kdist,
            offset,
        });
    }

    fn decision_function(&self, data: &Dataset) -> Result<Vec<f64>, DetectorError> {
        let model = self.fitted.as_ref().ok_or(DetectorError::NotFitted)?;
        Ok(data
            .rows()
            .iter()
            .map(|row| model.offset - self.factor(row, &model.train, &model.train_kdist, None))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Label;

    #[test]
    fn test_sparse_point_scores_higher() {
        // Dense grid plus one isolated point
        let mut rows: Vec<Vec<f64>> = (0..25)
            .map(|i| vec![(i % 5) as f64 * 0.2, (i / 5) as f64 * 0.2])
            .collect();
        rows.push(vec![8.0, 8.0]);
        let data = Dataset::from_rows(rows).unwrap();

        let mut detector = Lof::new(0.05, 5);
        detector.fit(&data);

        let labels = detector.predict(&data).unwrap();
        assert_eq!(labels[25], Label::Outlier);

        let likelihoods = detector.anomaly_likelihood(&data).unwrap();
        assert!(likelihoods[25] > likelihoods[12]);
        assert!(likelihoods.iter().all(|l| (0.0..=1.0).contains(l)));
    }

    #[test]
    fn test_not_fitted() {
        let detector = Lof::new(0.1, 5);
        let probe = Dataset::from_rows(vec![vec![0.0]]).unwrap();
        assert_eq!(
            detector.anomaly_likelihood(&probe).unwrap_err(),
            DetectorError::NotFitted
        );
    }

    #[test]
    fn test_identical_rows_do_not_blow_up() {
        let constant = Dataset::from_rows(vec![vec![2.0, 2.0]; 12]).unwrap();
        let mut detector = Lof::new(0.1, 3);
        detector.fit(&constant);
        let scores = detector.decision_function(&constant).unwrap();
        assert!(scores.iter().all(|s| s.is_finite()));
    }
}
