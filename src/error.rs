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

//! Error taxonomy for the whole harness.
//!
//! Structural errors (not fitted, unknown algorithm, bad connection)
//! propagate to the caller. Data-shape edge cases (degenerate score
//! ranges, empty time windows) are absorbed where they occur and never
//! surface as errors.

use thiserror::Error;

/// Errors raised by detectors and the algorithm registry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectorError {
    /// A scoring method was invoked before `fit`.
    #[error("detector is not fitted; call fit() before predict/decision_function")]
    NotFitted,

    /// The registry was asked for a name outside the supported set.
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Contamination must lie strictly between 0 and 0.5.
    #[error("contamination must lie in (0, 0.5), got {0}")]
    InvalidContamination(f64),
}

/// Errors raised by the data access layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// Authentication or host resolution failed while connecting.
    #[error("connection to '{host}' failed: {reason}")]
    Connection { host: String, reason: String },

    /// The queried table does not exist in the store.
    #[error("unknown table '{db}.{table}'")]
    MissingTable { db: String, table: String },

    /// The queried time column does not exist on the table.
    #[error("table '{db}.{table}' has no time column '{column}'")]
    MissingColumn {
        db: String,
        table: String,
        column: String,
    },

    /// Supplied ground-truth labels do not align with the table rows.
    #[error("ground truth has {labels} labels but table '{db}.{table}' has {rows} rows")]
    GroundTruthMismatch {
        db: String,
        table: String,
        labels: usize,
        rows: usize,
    },
}

/// Errors raised when constructing datasets from raw rows.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DatasetError {
    /// All rows must carry the same number of features.
    #[error("row {row} has {got} features, expected {expected}")]
    RaggedRows {
        row: usize,
        got: usize,
        expected: usize,
    },

    /// Timestamps, when present, must align one-to-one with rows.
    #[error("dataset has {rows} rows but {timestamps} timestamps")]
    TimestampMismatch { rows: usize, timestamps: usize },
}

/// Top-level error for the benchmark pipeline.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Detector(#[from] DetectorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = DetectorError::UnknownAlgorithm("foo".to_string());
        assert!(err.to_string().contains("'foo'"));

        let err = StoreError::MissingTable {
            db: "db".to_string(),
            table: "t".to_string(),
        };
        assert!(err.to_string().contains("db.t"));
    }

    #[test]
    fn test_bench_error_wraps_sources() {
        let wrapped: BenchError = DetectorError::NotFitted.into();
        assert!(matches!(wrapped, BenchError::Detector(_)));

        let wrapped: BenchError = StoreError::Connection {
            host: "h".to_string(),
            reason: "r".to_string(),
        }
        .into();
        assert!(matches!(wrapped, BenchError::Store(_)));
    }
}
