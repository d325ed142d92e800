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

//! The end-to-end benchmark pipeline: query a window once, then run
//! every requested algorithm over it, strictly sequentially.
//!
//! Fit/predict of different algorithms are independent, so this loop
//! could fan out across threads; it deliberately does not, keeping
//! report ordering deterministic.

use crate::core::{DetectionResult, Label, TimeWindow};
use crate::detector::{self, AlgorithmConfig};
use crate::error::BenchError;
use crate::eval::{self, Report};
use crate::store::{query_data, Connection};
use std::time::Instant;

/// What to benchmark and how.
#[derive(Debug, Clone)]
pub struct BenchOptions {
    pub db: String,
    pub table: String,
    pub time_column: String,
    pub algorithms: Vec<String>,
    pub contamination: f64,
    pub random_seed: Option<u64>,
    pub window: TimeWindow,
    pub temporal: bool,
    pub with_ground_truth: bool,
}

impl Default for BenchOptions {
    fn default() -> Self {
        BenchOptions {
            db: "demo".to_string(),
            table: "t".to_string(),
            time_column: "ts".to_string(),
            algorithms: detector::SUPPORTED.iter().map(ToString::to_string).collect(),
            contamination: 0.1,
            random_seed: None,
            window: TimeWindow::unbounded(),
            temporal: false,
            with_ground_truth: true,
        }
    }
}

/// One algorithm's full output: the report plus the raw result bundle.
#[derive(Debug)]
pub struct BenchOutcome {
    pub report: Report,
    pub result: DetectionResult,
}

/// Run the benchmark: one windowed query, then fit/score/evaluate each
/// algorithm in the order given.
///
/// Dispatch failures (unknown name, bad contamination) and query
/// failures abort the run; everything else is absorbed by the
/// individual stages.
pub fn run(
    conn: &Connection,
    ground_truth: Option<&[Label]>,
    options: &BenchOptions,
) -> Result<Vec<BenchOutcome>, BenchError> {
    let (data, window_truth) = query_data(
        conn,
        &options.db,
        &options.table,
        &options.time_column,
        ground_truth,
        options.window,
        options.temporal,
        options.with_ground_truth,
    )?;
    log::info!(
        "benchmarking {} algorithm(s) on {} rows x {} features",
        options.algorithms.len(),
        data.n_rows(),
        data.n_features()
    );

    let mut outcomes = Vec::with_capacity(options.algorithms.len());
    for name in &options.algorithms {
        let mut config = AlgorithmConfig::new(name).contamination(options.contamination);
        if let Some(seed) = options.random_seed {
            config = config.random_seed(seed);
        }
        let mut model = detector::select(&config)?;

        let started = Instant::now();
        model.fit(&data);
        let elapsed = started.elapsed().as_secs_f64();

        let predicted_labels = model.predict(&data)?;
        let raw_scores = model.decision_function(&data)?;
        let likelihoods = model.anomaly_likelihood(&data)?;

        let report = eval::output_performance(
            name,
            window_truth.as_deref(),
            &predicted_labels,
            elapsed,
            &raw_scores,
        );
        outcomes.push(BenchOutcome {
            report,
            result: DetectionResult {
                predicted_labels,
                raw_scores,
                likelihoods,
            },
        });
    }
    Ok(outcomes)
}
