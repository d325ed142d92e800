//! Covariance-based detector: Mahalanobis distance under a robust
//! (outlier-trimmed) location and scatter estimate.
//!
//! The estimate follows the concentration-step idea from FastMCD: start
//! from a random subset, repeatedly refit on the rows closest to the
//! current estimate until the support stabilizes, then calibrate the
//! decision threshold on the full training set.

use crate::core::Dataset;
use crate::detector::model::AnomalyDetector;
use crate::detector::stats;
use crate::error::DetectorError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Concentration steps after the initial random subset.
const MAX_C_STEPS: usize = 20;

struct CovarianceModel {
    mean: Vec<f64>,
    precision: Vec<Vec<f64>>,
    offset: f64,
}

/// Gaussian outlier detector over a robust covariance estimate.
pub struct RobustCovariance {
    contamination: f64,
    /// Fraction of training rows used as the robust support;
    /// `None` selects the minimal support `(n + d + 1) / 2`.
    support_fraction: Option<f64>,
    seed: Option<u64>,
    fitted: Option<CovarianceModel>,
}

impl RobustCovariance {
    pub fn new(contamination: f64, support_fraction: Option<f64>, seed: Option<u64>) -> Self {
        RobustCovariance {
            contamination,
            support_fraction,
            seed,
            fitted: None,
        }
    }

    fn support_size(&self, n: usize, d: usize) -> usize {
        let h = match self.support_fraction {
            Some(fraction) => (fraction * n as f64).round() as usize,
            None => (n + d + 1) / 2,
        };
        h.clamp((d + 1).min(n), n)
    }

    /// Mahalanobis distances (squared) of all rows under an estimate.
    fn distances(rows: &[Vec<f64>], mean: &[f64], precision: &[Vec<f64>]) -> Vec<f64> {
        rows.iter()
            .map(|row| mahalanobis_squared(row, mean, precision))
            .collect()
    }

    /// Fit mean and precision on a subset of row indices. Falls back
    /// to a ridge-regularized covariance when the subset is singular.
    fn estimate(rows: &[Vec<f64>], support: &[usize]) -> (Vec<f64>, Vec<Vec<f64>>) {
        let subset: Vec<Vec<f64>> = support.iter().map(|&i| rows[i].clone()).collect();
        let mean = stats::mean_rows(&subset);
        let mut cov = stats::covariance_matrix(&subset, &mean);
        if let Some(precision) = stats::invert(&cov) {
            return (mean, precision);
        }
        // Singular scatter (constant or collinear subset): regularize
        for (i, row) in cov.iter_mut().enumerate() {
            row[i] += 1e-6;
        }
        let d = mean.len();
        let precision = stats::invert(&cov).unwrap_or_else(|| {
            let mut eye = vec![vec![0.0; d]; d];
            for (i, row) in eye.iter_mut().enumerate() {
                row[i] = 1.0;
            }
            eye
        });
        (mean, precision)
    }
}

impl AnomalyDetector for RobustCovariance {
    fn fit(&mut self, data: &Dataset) {
        let rows = data.rows();
        let n = rows.len();
        if n == 0 || data.n_features() == 0 {
            self.fitted = Some(CovarianceModel {
                mean: vec![0.0; data.n_features()],
                precision: Vec::new(),
                offset: 0.0,
            });
            return;
        }

        let d = data.n_features();
        let h = self.support_size(n, d);

        let mut rng = self
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut support: Vec<usize> = (0..n).collect();
        support.shuffle(&mut rng);
        support.truncate(h);
        support.sort_unstable();

        let (mut mean, mut precision) = Self::estimate(rows, &support);
        for _ in 0..MAX_C_STEPS {
            // Concentrate on the h rows closest to the current estimate
            let distances = Self::distances(rows, &mean, &precision);
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by(|&a, &b| {
                distances[a]
                    .partial_cmp(&distances[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let mut next: Vec<usize> = order.into_iter().take(h).collect();
            next.sort_unstable();
            if next == support {
                break;
            }
            support = next;
            let refit = Self::estimate(rows, &support);
            mean = refit.0;
            precision = refit.1;
        }

        let distances = Self::distances(rows, &mean, &precision);
        let offset = stats::contamination_offset(&distances, self.contamination);
        self.fitted = Some(CovarianceModel {
            mean,
            precision,
            offset,
        });
    }

    fn decision_function(&self, data: &Dataset) -> Result<Vec<f64>, DetectorError> {
        let model = self.fitted.as_ref().ok_or(DetectorError::NotFitted)?;
        Ok(data
            .rows()
            .iter()
            .map(|row| model.offset - mahalanobis_squared(row, &model.mean, &model.precision))
            .collect())
    }
}

fn mahalanobis_squared(row: &[f64], mean: &[f64], precision: &[Vec<f64>]) -> f64 {
    if precision.is_empty() {
        return 0.0;
    }
    let d = mean.len();
    let centered: Vec<f64> = (0..d).map(|i| row[i] - mean[i]).collect();
    let mut total = 0.0;
    for i in 0..d {
        for j in 0..d {
            total += centered[i] * precision[i][j] * centered[j];
        }
    }
    total.max(0.0)
}
