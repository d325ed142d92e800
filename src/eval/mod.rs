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

//! Evaluation of detector output against ground truth.

pub mod metrics;
pub mod report;

pub use report::{ClassificationMetrics, Report};

use crate::core::Label;
use metrics::ScoreStats;

/// Compare predictions and raw scores against ground truth and build
/// the performance report. Without ground truth, only the score
/// distribution is reported; the call never fails.
///
/// Inputs are borrowed immutably and left untouched.
pub fn output_performance(
    algorithm: &str,
    ground_truth: Option<&[Label]>,
    predictions: &[Label],
    elapsed_secs: f64,
    decision_scores: &[f64],
) -> Report {
    let classification = ground_truth.map(|gt| {
        let precision = metrics::precision(gt, predictions);
        let recall = metrics::recall(gt, predictions);
        ClassificationMetrics {
            precision,
            recall,
            f1: metrics::f1(precision, recall),
            roc_auc: metrics::roc_auc(gt, decision_scores),
        }
    });

    if let Some(m) = &classification {
        log::info!(
            "{algorithm}: precision {:.4}, recall {:.4}, f1 {:.4}, roc-auc {:.4}, {elapsed_secs:.4}s",
            m.precision,
            m.recall,
            m.f1,
            m.roc_auc
        );
    } else {
        log::info!("{algorithm}: no ground truth, reporting score statistics only");
    }

    Report {
        algorithm: algorithm.to_string(),
        elapsed_secs,
        metrics: classification,
        score_stats: ScoreStats::from_scores(decision_scores),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::{Inlier, Outlier};

    #[test]
    fn test_report_with_ground_truth() {
        let gt = vec![Outlier, Inlier, Inlier, Outlier];
        let pred = vec![Outlier, Inlier, Outlier, Outlier];
        let scores = vec![-2.0, 1.0, -0.5, -1.5];
        let report = output_performance("knn", Some(&gt), &pred, 0.05, &scores);

        let metrics = report.metrics.expect("metrics expected with ground truth");
        assert!((metrics.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.recall - 1.0).abs() < 1e-12);
        assert!(metrics.roc_auc > 0.9);
        assert_eq!(report.score_stats.count, 4);
    }

    #[test]
    fn test_report_without_ground_truth() {
        let pred = vec![Inlier, Inlier];
        let report = output_performance("pca", None, &pred, 0.01, &[0.2, 0.4]);
        assert!(report.metrics.is_none());
        assert_eq!(report.score_stats.count, 2);
        assert!((report.score_stats.mean - 0.3).abs() < 1e-12);
    }
}
