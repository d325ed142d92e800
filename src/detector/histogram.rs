//! Histogram-based detector (HBOS style): per-feature histograms,
//! summed negative log bin mass. Features are treated as independent.

use crate::core::Dataset;
use crate::detector::model::AnomalyDetector;
use crate::detector::stats;
use crate::error::DetectorError;

/// Mass assigned to values that fall outside every training bin.
const OUT_OF_RANGE_MASS: f64 = 1e-6;

struct FeatureHistogram {
    min: f64,
    max: f64,
    /// Probability mass per bin; empty when the feature is constant.
    mass: Vec<f64>,
    constant_value: Option<f64>,
}

impl FeatureHistogram {
    fn build(values: &[f64], n_bins: usize) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if (max - min).abs() < f64::EPSILON {
            return FeatureHistogram {
                min,
                max,
                mass: Vec::new(),
                constant_value: Some(min),
            };
        }
        let mut counts = vec![0usize; n_bins];
        for &v in values {
            let mut bin = ((v - min) / (max - min) * n_bins as f64) as usize;
            if bin >= n_bins {
                bin = n_bins - 1; // max value lands in the last bin
            }
            counts[bin] += 1;
        }
        let total = values.len() as f64;
        FeatureHistogram {
            min,
            max,
            mass: counts.iter().map(|&c| c as f64 / total).collect(),
            constant_value: None,
        }
    }

    fn mass_at(&self, v: f64) -> f64 {
        if let Some(constant) = self.constant_value {
            return if (v - constant).abs() < f64::EPSILON {
                1.0
            } else {
                OUT_OF_RANGE_MASS
            };
        }
        if v < self.min || v > self.max {
            return OUT_OF_RANGE_MASS;
        }
        let n_bins = self.mass.len();
        let mut bin = ((v - self.min) / (self.max - self.min) * n_bins as f64) as usize;
        if bin >= n_bins {
            bin = n_bins - 1;
        }
        self.mass[bin].max(OUT_OF_RANGE_MASS)
    }
}

struct HbosModel {
    histograms: Vec<FeatureHistogram>,
    offset: f64,
}

/// Histogram-based outlier score.
pub struct Hbos {
    contamination: f64,
    /// Bin count override; `None` uses sqrt(n).
    n_bins: Option<usize>,
    fitted: Option<HbosModel>,
}

impl Hbos {
    pub fn new(contamination: f64, n_bins: Option<usize>) -> Self {
        Hbos {
            contamination,
            n_bins,
            fitted: None,
        }
    }

    fn outlyingness(histograms: &[FeatureHistogram], row: &[f64]) -> f64 {
        histograms
            .iter()
            .zip(row.iter())
            .map(|(hist, &v)| -hist.mass_at(v).ln())
            .sum()
    }
}

impl AnomalyDetector for Hbos {
    fn fit(&mut self, data: &Dataset) {
        let n = data.n_rows();
        let n_bins = self
            .n_bins
            .unwrap_or_else(|| (n as f64).sqrt().ceil() as usize)
            .max(1);

        let histograms: Vec<FeatureHistogram> = (0..data.n_features())
            .map(|feature| {
                let column: Vec<f64> = data.rows().iter().map(|row| row[feature]).collect();
                FeatureHistogram::build(&column, n_bins)
            })
            .collect();

        let outlyingness: Vec<f64> = data
            .rows()
            .iter()
            .map(|row| Self::outlyingness(&histograms, row))
            .collect();
        let offset = stats::contamination_offset(&outlyingness, self.contamination);
        self.fitted = Some(HbosModel { histograms, offset });
    }

    fn decision_function(&self, data: &Dataset) -> Result<Vec<f64>, DetectorError> {
        let model = self.fitted.as_ref().ok_or(DetectorError::NotFitted)?;
        Ok(data
            .rows()
            .iter()
            .map(|row| model.offset - Self::outlyingness(&model.histograms, row))
            .collect())
    }
}
