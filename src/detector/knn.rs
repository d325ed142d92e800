//! Distance-based detector: mean distance to the k nearest training
//! rows.

use crate::core::Dataset;
use crate::detector::model::AnomalyDetector;
use crate::detector::stats;
use crate::error::DetectorError;

pub const DEFAULT_NEIGHBORS: usize = 5;

struct KnnModel {
    train: Vec<Vec<f64>>,
    offset: f64,
}

/// k-nearest-neighbor outlier detector.
pub struct Knn {
    contamination: f64,
    n_neighbors: usize,
    fitted: Option<KnnModel>,
}

impl Knn {
    pub fn new(contamination: f64, n_neighbors: usize) -> Self {
        Knn {
            contamination,
            n_neighbors: n_neighbors.max(1),
            fitted: None,
        }
    }

    fn outlyingness(&self, row: &[f64], train: &[Vec<f64>], skip: Option<usize>) -> f64 {
        mean_knn_distance(row, train, self.n_neighbors, skip)
    }
}

/// Mean Euclidean distance from `row` to its k nearest rows in
/// `train`, optionally skipping one index (the row itself during
/// training calibration).
pub(crate) fn mean_knn_distance(
    row: &[f64],
    train: &[Vec<f64>],
    k: usize,
    skip: Option<usize>,
) -> f64 {
    let mut distances: Vec<f64> = train
        .iter()
        .enumerate()
        .filter(|&(i, _)| Some(i) != skip)
        .map(|(_, other)| stats::euclidean(row, other))
        .collect();
    if distances.is_empty() {
        return 0.0;
    }
    distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let k = k.min(distances.len());
    distances[..k].iter().sum::<f64>() / k as f64
}

impl AnomalyDetector for Knn {
    fn fit(&mut self, data: &Dataset) {
        let train = data.rows().to_vec();
        // Self-distances are excluded so the calibration is not
        // dragged toward zero
        let outlyingness: Vec<f64> = train
            .iter()
            .enumerate()
            .map(|(i, row)| self.outlyingness(row, &train, Some(i)))
            .collect();
        let offset = stats::contamination_offset(&outlyingness, self.contamination);
        self.fitted = Some(KnnModel { train, offset });
    }

    fn decision_function(&self, data: &Dataset) -> Result<Vec<f64>, DetectorError> {
        let model = self.fitted.as_ref().ok_or(DetectorError::NotFitted)?;
        Ok(data
            .rows()
            .iter()
            .map(|row| model.offset - self.outlyingness(row, &model.train, None))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Label;

    fn clustered_dataset() -> Dataset {
        // Tight cluster around (0, 0) plus one far point
        let mut rows: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![(i % 5) as f64 * 0.1, (i / 5) as f64 * 0.1])
            .collect();
        rows.push(vec![10.0, 10.0]);
        Dataset::from_rows(rows).unwrap()
    }

    #[test]
    fn test_far_point_is_outlier() {
        let data = clustered_dataset();
        let mut detector = Knn::new(0.05, DEFAULT_NEIGHBORS);
        detector.fit(&data);

        let labels = detector.predict(&data).unwrap();
        assert_eq!(labels[20], Label::Outlier);
        assert_eq!(labels[0], Label::Inlier);

        let likelihoods = detector.anomaly_likelihood(&data).unwrap();
        assert!(likelihoods[20] > likelihoods[0]);
    }

    #[test]
    fn test_output_lengths() {
        let data = clustered_dataset();
        let mut detector = Knn::new(0.1, 3);
        detector.fit(&data);
        assert_eq!(detector.predict(&data).unwrap().len(), data.n_rows());
        assert_eq!(
            detector.decision_function(&data).unwrap().len(),
            data.n_rows()
        );
        assert_eq!(
            detector.anomaly_likelihood(&data).unwrap().len(),
            data.n_rows()
        );
    }

    #[test]
    fn test_not_fitted() {
        let detector = Knn::new(0.1, 5);
        assert_eq!(
            detector.predict(&clustered_dataset()).unwrap_err(),
            DetectorError::NotFitted
        );
    }

    #[test]
    fn test_single_row_training() {
        let tiny = Dataset::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        let mut detector = Knn::new(0.1, 5);
        detector.fit(&tiny);
        let scores = detector.decision_function(&tiny).unwrap();
        assert!(scores[0].is_finite());
    }
}
