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

//! OddBench: a benchmarking harness for unsupervised outlier
//! detection.
//!
//! Many detection algorithms sit behind one [`AnomalyDetector`]
//! contract; their heterogeneous raw scores are normalized into a
//! comparable [0, 1] anomaly likelihood, and the evaluator compares
//! them against labeled, time-windowed datasets pulled from an
//! embedded store.

pub mod bench;
pub mod core;
pub mod detector;
pub mod error;
pub mod eval;
pub mod store;

pub use crate::core::{Dataset, DetectionResult, Label, TimeWindow};
pub use crate::detector::model::AnomalyDetector;
pub use crate::detector::{select, AlgorithmConfig};
pub use crate::error::{BenchError, DetectorError, StoreError};
pub use crate::eval::{output_performance, Report};
pub use crate::store::{connect, insert_demo_data, query_data, Connection};
