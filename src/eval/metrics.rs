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

//! Classification-quality and score-distribution metrics.

use crate::core::Label;
use serde::{Deserialize, Serialize};

/// Precision over the outlier class: of everything flagged, how much
/// really was an outlier. 0 when nothing was flagged.
pub fn precision(ground_truth: &[Label], predictions: &[Label]) -> f64 {
    let flagged = predictions.iter().filter(|p| p.is_outlier()).count();
    if flagged == 0 {
        return 0.0;
    }
    true_positives(ground_truth, predictions) as f64 / flagged as f64
}

/// Recall over the outlier class. 0 when the ground truth holds no
/// outliers.
pub fn recall(ground_truth: &[Label], predictions: &[Label]) -> f64 {
    let actual = ground_truth.iter().filter(|g| g.is_outlier()).count();
    if actual == 0 {
        return 0.0;
    }
    true_positives(ground_truth, predictions) as f64 / actual as f64
}

/// Harmonic mean of precision and recall; 0 when both are 0.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

/// Ranking quality of the raw decision scores (more negative = more
/// anomalous) as ROC-AUC, with tied scores receiving averaged ranks.
///
/// Degenerates to 0.5 when one class is absent, never NaN.
pub fn roc_auc(ground_truth: &[Label], decision_scores: &[f64]) -> f64 {
    let n = ground_truth.len().min(decision_scores.len());
    let n_pos = ground_truth[..n].iter().filter(|g| g.is_outlier()).count();
    let n_neg = n - n_pos;
    if n_pos == 0 || n_neg == 0 {
        log::debug!("single-class ground truth, ROC-AUC defaults to 0.5");
        return 0.5;
    }

    // Rank ascending in anomaly order: negated decision score
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        (-decision_scores[a])
            .partial_cmp(&(-decision_scores[b]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Average ranks across tie groups
    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n
            && (decision_scores[order[j + 1]] - decision_scores[order[j]]).abs() < 1e-12
        {
            j += 1;
        }
        let averaged = (i + 1 + j + 1) as f64 / 2.0;
        for k in i..=j {
            ranks[order[k]] = averaged;
        }
        i = j + 1;
    }

    let positive_rank_sum: f64 = ground_truth[..n]
        .iter()
        .zip(ranks.iter())
        .filter(|(g, _)| g.is_outlier())
        .map(|(_, &r)| r)
        .sum();
    let auc = (positive_rank_sum - (n_pos * (n_pos + 1)) as f64 / 2.0)
        / (n_pos as f64 * n_neg as f64);
    auc.clamp(0.0, 1.0)
}

fn true_positives(ground_truth: &[Label], predictions: &[Label]) -> usize {
    ground_truth
        .iter()
        .zip(predictions.iter())
        .filter(|(g, p)| g.is_outlier() && p.is_outlier())
        .count()
}

/// Distribution summary of a score sequence; reported when no ground
/// truth is available.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl ScoreStats {
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return ScoreStats {
                count: 0,
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                median: 0.0,
                max: 0.0,
            };
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        let mut sorted = scores.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = if sorted.len() % 2 == 1 {
            sorted[sorted.len() / 2]
        } else {
            f64::midpoint(sorted[sorted.len() / 2 - 1], sorted[sorted.len() / 2])
        };
        ScoreStats {
            count: scores.len(),
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            median,
            max: sorted[sorted.len() - 1],
        }
    }
}
