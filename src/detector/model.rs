//! The uniform detector contract every algorithm variant satisfies.

use crate::core::{Dataset, Label};
use crate::detector::likelihood;
use crate::error::DetectorError;

/// A stateful outlier-detection model.
///
/// The lifecycle is: construct unfit, `fit` once (repeat calls retrain
/// from scratch), then score read-only. Every scoring method fails
/// with [`DetectorError::NotFitted`] before the first `fit`.
///
/// The decision-score sign convention is fixed across all variants: a
/// negative score classifies the row as an outlier, and the zero
/// crossing is calibrated during `fit` so that roughly
/// `contamination * n` training rows score below zero.
pub trait AnomalyDetector: Send {
    /// Learn model state from the dataset, discarding any prior state.
    fn fit(&mut self, data: &Dataset);

    /// Raw signed anomaly scores, one per dataset row.
    fn decision_function(&self, data: &Dataset) -> Result<Vec<f64>, DetectorError>;

    /// Outlier/inlier classification of every row.
    fn predict(&self, data: &Dataset) -> Result<Vec<Label>, DetectorError> {
        let labels = self
            .decision_function(data)?
            .iter()
            .map(|&score| {
                if score < 0.0 {
                    Label::Outlier
                } else {
                    Label::Inlier
                }
            })
            .collect();
        Ok(labels)
    }

    /// Calibrated [0, 1] anomaly likelihood of every row; 0.5 marks
    /// the decision boundary.
    fn anomaly_likelihood(&self, data: &Dataset) -> Result<Vec<f64>, DetectorError> {
        Ok(likelihood::normalize(&self.decision_function(data)?))
    }
}
