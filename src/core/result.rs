// OddBench - GPL-3.0-or-later
// This file is part of OddBench.
//
// Copyright (C) 2026 The OddBench Authors
//
// OddBench is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OddBench is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OddBench.  If not, see <https://www.gnu.org/licenses/>.

//! Labels and the per-run detection result bundle.

use serde::{Deserialize, Serialize};

/// Binary classification of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Outlier,
    Inlier,
}

impl Label {
    pub fn is_outlier(self) -> bool {
        self == Label::Outlier
    }
}

/// Everything one detector produced for one dataset: predictions, raw
/// decision scores (negative = outlier), and calibrated likelihoods.
///
/// All three sequences are aligned to the dataset rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub predicted_labels: Vec<Label>,
    pub raw_scores: Vec<f64>,
    pub likelihoods: Vec<f64>,
}

impl DetectionResult {
    /// Number of scored rows.
    pub fn len(&self) -> usize {
        self.predicted_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicted_labels.is_empty()
    }

    /// True when all three sequences have the same length.
    pub fn is_consistent(&self) -> bool {
        self.predicted_labels.len() == self.raw_scores.len()
            && self.raw_scores.len() == self.likelihoods.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        let json = serde_json::to_string(&Label::Outlier).unwrap();
        let back: Label = serde_json::from_str(&json).unwrap();
        assert!(back.is_outlier());
        assert!(!Label::Inlier.is_outlier());
    }

    #[test]
    fn test_result_consistency() {
        let result = DetectionResult {
            predicted_labels: vec![Label::Inlier, Label::Outlier],
            raw_scores: vec![0.4, -1.2],
            likelihoods: vec![0.25, 0.75],
        };
        assert!(result.is_consistent());
        assert_eq!(result.len(), 2);

        let broken = DetectionResult {
            predicted_labels: vec![Label::Inlier],
            raw_scores: vec![0.4, -1.2],
            likelihoods: vec![0.25],
        };
        assert!(!broken.is_consistent());
    }
}
