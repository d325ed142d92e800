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

//! Synthetic reference data for benchmarking.
//!
//! Seeds a known-label dataset into the store: hourly timestamps over
//! July and August 2019, Gaussian features, and a small fraction of
//! injected outliers shifted far out of the bulk.

use crate::core::Label;
use crate::store::connection::{Connection, Table};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hourly points over 62 days.
const DEMO_ROWS: usize = 62 * 24;
const DEMO_FEATURES: usize = 4;
/// Fraction of rows turned into outliers.
const OUTLIER_FRACTION: f64 = 0.05;
/// How far (in standard deviations) outliers are pushed out.
const OUTLIER_SHIFT: f64 = 6.0;

/// Populate `db.table` with the demo dataset and return its ground
/// truth when asked for. The time column is named `ts`.
pub fn insert_demo_data(
    conn: &mut Connection,
    db: &str,
    table: &str,
    seed: u64,
    with_ground_truth: bool,
) -> Option<Vec<Label>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2019, 7, 1)
        .expect("valid demo start date")
        .and_hms_opt(0, 0, 0)
        .expect("valid demo start time");

    let mut rows = Vec::with_capacity(DEMO_ROWS);
    let mut timestamps = Vec::with_capacity(DEMO_ROWS);
    let mut labels = Vec::with_capacity(DEMO_ROWS);

    for i in 0..DEMO_ROWS {
        timestamps.push(start + Duration::hours(i as i64));
        let is_outlier = rng.gen::<f64>() < OUTLIER_FRACTION;
        let mut row: Vec<f64> = (0..DEMO_FEATURES)
            .map(|_| standard_normal(&mut rng))
            .collect();
        if is_outlier {
            // Push the whole row out along a random orthant
            for x in &mut row {
                let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
                *x += sign * OUTLIER_SHIFT;
            }
        }
        rows.push(row);
        labels.push(if is_outlier {
            Label::Outlier
        } else {
            Label::Inlier
        });
    }

    let outliers = labels.iter().filter(|l| l.is_outlier()).count();
    log::info!(
        "seeded demo table {db}.{table}: {DEMO_ROWS} rows, {outliers} outliers"
    );

    conn.put_table(
        db,
        table,
        Table {
            time_column: "ts".to_string(),
            timestamps,
            rows,
        },
    );

    with_ground_truth.then_some(labels)
}

/// Box-Muller transform over the uniform generator.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
