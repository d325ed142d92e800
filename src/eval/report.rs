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

//! Per-algorithm performance report.

use crate::eval::metrics::ScoreStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification metrics; only present when ground truth was
/// available.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: f64,
}

/// Everything the evaluator reports for one algorithm run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub algorithm: String,
    pub elapsed_secs: f64,
    pub metrics: Option<ClassificationMetrics>,
    pub score_stats: ScoreStats,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "─────────────────────────────────────────────────────────────────"
        )?;
        writeln!(
            f,
            "{:18} {:>12} {:>10}",
            "Algorithm", "Elapsed (s)", "Rows"
        )?;
        writeln!(
            f,
            "{:18} {:>12.4} {:>10}",
            self.algorithm, self.elapsed_secs, self.score_stats.count
        )?;
        if let Some(metrics) = &self.metrics {
            writeln!(
                f,
                "{:18} {:>10} {:>10} {:>10}",
                "Precision", "Recall", "F1", "ROC-AUC"
            )?;
            writeln!(
                f,
                "{:18.4} {:>10.4} {:>10.4} {:>10.4}",
                metrics.precision, metrics.recall, metrics.f1, metrics.roc_auc
            )?;
        } else {
            writeln!(
                f,
                "no ground truth; score distribution: mean {:.4}, std {:.4}, \
                 min {:.4}, median {:.4}, max {:.4}",
                self.score_stats.mean,
                self.score_stats.std_dev,
                self.score_stats.min,
                self.score_stats.median,
                self.score_stats.max
            )?;
        }
        write!(
            f,
            "─────────────────────────────────────────────────────────────────"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(with_metrics: bool) -> Report {
        Report {
            algorithm: "knn".to_string(),
            elapsed_secs: 0.123,
            metrics: with_metrics.then_some(ClassificationMetrics {
                precision: 0.8,
                recall: 0.6,
                f1: 0.6857,
                roc_auc: 0.91,
            }),
            score_stats: ScoreStats::from_scores(&[-1.0, 0.0, 1.0]),
        }
    }

    #[test]
    fn test_display_with_metrics() {
        let text = sample_report(true).to_string();
        assert!(text.contains("knn"));
        assert!(text.contains("ROC-AUC"));
    }

    #[test]
    fn test_display_score_only() {
        let text = sample_report(false).to_string();
        assert!(text.contains("no ground truth"));
        assert!(!text.contains("ROC-AUC"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let report = sample_report(true);
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
