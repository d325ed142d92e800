//! Detector variants, the uniform contract they satisfy, and the
//! name-based registry that constructs them.

pub mod covariance;
pub mod histogram;
pub mod knn;
pub mod likelihood;
pub mod lof;
pub mod model;
pub mod pca;
pub mod stats;

use crate::error::DetectorError;
use covariance::RobustCovariance;
use histogram::Hbos;
use knn::Knn;
use lof::Lof;
use model::AnomalyDetector;
use pca::Pca;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed set of algorithm names the registry resolves.
pub const SUPPORTED: &[&str] = &["robustcovariance", "knn", "lof", "hbos", "pca"];

/// Shared hyperparameters plus algorithm-specific overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    pub name: String,
    /// Expected outlier fraction, strictly inside (0, 0.5).
    pub contamination: f64,
    pub random_seed: Option<u64>,
    /// Per-algorithm numeric overrides, e.g. `n_neighbors` or `n_bins`.
    #[serde(default)]
    pub extra: HashMap<String, f64>,
}

impl AlgorithmConfig {
    pub fn new(name: impl Into<String>) -> Self {
        AlgorithmConfig {
            name: name.into(),
            contamination: 0.1,
            random_seed: None,
            extra: HashMap::new(),
        }
    }

    pub fn contamination(mut self, contamination: f64) -> Self {
        self.contamination = contamination;
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: f64) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    fn extra_usize(&self, key: &str, default: usize) -> usize {
        self.extra
            .get(key)
            .map_or(default, |&v| v.max(1.0).round() as usize)
    }
}

/// Resolve an algorithm name into a fresh, unfit detector.
///
/// Fails with [`DetectorError::UnknownAlgorithm`] for names outside
/// [`SUPPORTED`] and [`DetectorError::InvalidContamination`] when the
/// contamination invariant is violated. Pure construction: no dataset
/// is touched.
pub fn select(config: &AlgorithmConfig) -> Result<Box<dyn AnomalyDetector>, DetectorError> {
    if !(config.contamination > 0.0 && config.contamination < 0.5) {
        return Err(DetectorError::InvalidContamination(config.contamination));
    }

    let detector: Box<dyn AnomalyDetector> = match config.name.as_str() {
        "robustcovariance" => Box::new(RobustCovariance::new(
            config.contamination,
            config.extra.get("support_fraction").copied(),
            config.random_seed,
        )),
        "knn" => Box::new(Knn::new(
            config.contamination,
            config.extra_usize("n_neighbors", knn::DEFAULT_NEIGHBORS),
        )),
        "lof" => Box::new(Lof::new(
            config.contamination,
            config.extra_usize("n_neighbors", lof::DEFAULT_NEIGHBORS),
        )),
        "hbos" => Box::new(Hbos::new(
            config.contamination,
            config.extra.get("n_bins").map(|&v| v.max(1.0) as usize),
        )),
        "pca" => Box::new(Pca::new(
            config.contamination,
            config
                .extra
                .get("n_components")
                .map(|&v| v.max(1.0) as usize),
        )),
        other => {
            log::warn!("algorithm selection failed for '{other}'");
            return Err(DetectorError::UnknownAlgorithm(other.to_string()));
        }
    };
    log::debug!(
        "selected algorithm '{}' (contamination {})",
        config.name,
        config.contamination
    );
    Ok(detector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dataset;

    #[test]
    fn test_every_supported_name_constructs() {
        for name in SUPPORTED {
            let config = AlgorithmConfig::new(*name).contamination(0.1).random_seed(0);
            assert!(select(&config).is_ok(), "failed to construct '{name}'");
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        let config = AlgorithmConfig::new("unknown_algorithm_xyz").contamination(0.1);
        let err = select(&config).err().expect("unknown name must not resolve");
        assert_eq!(
            err,
            DetectorError::UnknownAlgorithm("unknown_algorithm_xyz".to_string())
        );
    }

    #[test]
    fn test_contamination_invariant() {
        for bad in [0.0, -0.1, 0.5, 0.7] {
            let config = AlgorithmConfig::new("knn").contamination(bad);
            let err = select(&config)
                .err()
                .expect("out-of-range contamination must be rejected");
            assert_eq!(err, DetectorError::InvalidContamination(bad));
        }
    }

    #[test]
    fn test_detectors_are_never_pre_fit() {
        let data = Dataset::from_rows(vec![vec![1.0], vec![2.0]]).unwrap();
        for name in SUPPORTED {
            let config = AlgorithmConfig::new(*name).random_seed(0);
            let detector = select(&config).unwrap();
            assert_eq!(
                detector.predict(&data).unwrap_err(),
                DetectorError::NotFitted,
                "'{name}' must start unfit"
            );
        }
    }

    #[test]
    fn test_extra_overrides_parse() {
        let config = AlgorithmConfig::new("knn")
            .contamination(0.2)
            .extra("n_neighbors", 3.0);
        assert_eq!(config.extra_usize("n_neighbors", 5), 3);
        assert_eq!(config.extra_usize("missing", 5), 5);
        assert!(select(&config).is_ok());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AlgorithmConfig::new("hbos")
            .contamination(0.05)
            .extra("n_bins", 12.0);
        let json = serde_json::to_string(&config).unwrap();
        let back: AlgorithmConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "hbos");
        assert!((back.contamination - 0.05).abs() < 1e-12);
        assert_eq!(back.extra.get("n_bins").copied(), Some(12.0));
    }
}
