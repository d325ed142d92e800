//! Reconstruction-error detector: project standardized rows onto the
//! top principal components and score the squared residual.

use crate::core::Dataset;
use crate::detector::model::AnomalyDetector;
use crate::detector::stats;
use crate::error::DetectorError;

struct PcaModel {
    mean: Vec<f64>,
    scale: Vec<f64>,
    /// Principal axes, one vector per kept component.
    components: Vec<Vec<f64>>,
    offset: f64,
}

/// Principal-component reconstruction error.
pub struct Pca {
    contamination: f64,
    /// Component count override; `None` keeps the components covering
    /// 90% of the variance.
    n_components: Option<usize>,
    fitted: Option<PcaModel>,
}

impl Pca {
    pub fn new(contamination: f64, n_components: Option<usize>) -> Self {
        Pca {
            contamination,
            n_components,
            fitted: None,
        }
    }

    fn standardize(row: &[f64], mean: &[f64], scale: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(mean.iter().zip(scale.iter()))
            .map(|(&x, (&m, &s))| (x - m) / s)
            .collect()
    }

    fn residual(model: &PcaModel, row: &[f64]) -> f64 {
        let z = Self::standardize(row, &model.mean, &model.scale);
        let mut reconstructed = vec![0.0; z.len()];
        for axis in &model.components {
            let projection: f64 = z.iter().zip(axis.iter()).map(|(a, b)| a * b).sum();
            for (r, &a) in reconstructed.iter_mut().zip(axis.iter()) {
                *r += projection * a;
            }
        }
        z.iter()
            .zip(reconstructed.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

impl AnomalyDetector for Pca {
    fn fit(&mut self, data: &Dataset) {
        let d = data.n_features();
        let mean = stats::mean_rows(data.rows());
        let mut scale = vec![1.0; d];
        if data.n_rows() > 1 {
            let cov = stats::covariance_matrix(data.rows(), &mean);
            for (i, s) in scale.iter_mut().enumerate() {
                let sd = cov[i][i].sqrt();
                if sd > f64::EPSILON {
                    *s = sd;
                }
            }
        }

        let standardized: Vec<Vec<f64>> = data
            .rows()
            .iter()
            .map(|row| Self::standardize(row, &mean, &scale))
            .collect();
        let std_mean = vec![0.0; d];
        let corr = stats::covariance_matrix(&standardized, &std_mean);

        let (eigenvalues, eigenvectors) = stats::jacobi_eigen(&corr);
        let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let keep = match self.n_components {
            Some(k) => k.clamp(1, d.max(1)),
            None => {
                let total: f64 = eigenvalues.iter().map(|&v| v.max(0.0)).sum();
                if total > 0.0 {
                    let mut cumulative = 0.0;
                    let mut k = 0;
                    for &i in &order {
                        cumulative += eigenvalues[i].max(0.0);
                        k += 1;
                        if cumulative / total >= 0.9 {
                            break;
                        }
                    }
                    k
                } else {
                    1
                }
            }
        };

        let components: Vec<Vec<f64>> = order
            .iter()
            .take(keep.min(d))
            .map(|&i| (0..d).map(|row| eigenvectors[row][i]).collect())
            .collect();

        let mut model = PcaModel {
            mean,
            scale,
            components,
            offset: 0.0,
        };
        let residuals: Vec<f64> = data
            .rows()
            .iter()
            .map(|row| Self::residual(&model, row))
            .collect();
        model.offset = stats::contamination_offset(&residuals, self.contamination);
        self.fitted = Some(model);
    }

    fn decision_function(&self, data: &Dataset) -> Result<Vec<f64>, DetectorError> {
        let model = self.fitted.as_ref().ok_or(DetectorError::NotFitted)?;
        Ok(data
            .rows()
            .iter()
            .map(|row| model.offset - Self::residual(model, row))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rows lying on the x = y line, with small noise on one of them.
    fn linear_dataset() -> Dataset {
        let rows: Vec<Vec<f64>> = (0..40).map(|i| vec![f64::from(i), f64::from(i)]).collect();
        Dataset::from_rows(rows).unwrap()
    }

    #[test]
    fn test_off_axis_point_scores_worse() {
        let mut detector = Pca::new(0.1, Some(1));
        detector.fit(&linear_dataset());

        // On-line point reconstructs perfectly, off-line point does not
        let probes = Dataset::from_rows(vec![vec![20.0, 20.0], vec![20.0, -20.0]]).unwrap();
        let scores = detector.decision_function(&probes).unwrap();
        assert!(scores[0] > scores[1]);
        assert!(scores[1] < 0.0);
    }

    #[test]
    fn test_variance_based_component_count() {
        let mut detector = Pca::new(0.1, None);
        detector.fit(&linear_dataset());
        // One component explains all the variance of collinear data
        assert_eq!(detector.fitted.as_ref().unwrap().components.len(), 1);
    }

    #[test]
    fn test_constant_data_is_total() {
        let constant = Dataset::from_rows(vec![vec![5.0, 5.0]; 10]).unwrap();
        let mut detector = Pca::new(0.1, None);
        detector.fit(&constant);
        let scores = detector.decision_function(&constant).unwrap();
        assert!(scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_not_fitted() {
        let detector = Pca::new(0.1, None);
        assert_eq!(
            detector.decision_function(&linear_dataset()).unwrap_err(),
            DetectorError::NotFitted
        );
    }
}
