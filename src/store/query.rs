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

//! Time-windowed retrieval from the store.

use crate::core::{Dataset, Label, TimeWindow};
use crate::error::StoreError;
use crate::store::connection::Connection;

/// Fetch the rows of `db.table` whose time column falls inside the
/// inclusive window, together with the index-aligned subsequence of
/// the supplied ground-truth labels when requested.
///
/// - An absent window bound leaves that side unbounded.
/// - An inverted window (`start > end`) yields an empty dataset, not
///   an error.
/// - `temporal` orders the result by non-decreasing timestamp (stable,
///   so equal timestamps keep their insertion order) and attaches the
///   timestamps to the dataset; otherwise rows come back in insertion
///   order and no timestamps are attached.
/// - Supplied ground-truth labels must align one-to-one with the
///   table's rows.
/// - `with_ground_truth == false` returns `None` for labels no matter
///   what the caller supplied.
pub fn query_data(
    conn: &Connection,
    db: &str,
    table: &str,
    time_column: &str,
    ground_truth: Option<&[Label]>,
    window: TimeWindow,
    temporal: bool,
    with_ground_truth: bool,
) -> Result<(Dataset, Option<Vec<Label>>), StoreError> {
    let stored = conn.table(db, table)?;
    if stored.time_column != time_column {
        return Err(StoreError::MissingColumn {
            db: db.to_string(),
            table: table.to_string(),
            column: time_column.to_string(),
        });
    }
    if let Some(all) = ground_truth {
        if all.len() != stored.rows.len() {
            return Err(StoreError::GroundTruthMismatch {
                db: db.to_string(),
                table: table.to_string(),
                labels: all.len(),
                rows: stored.rows.len(),
            });
        }
    }

    if window.is_inverted() {
        log::debug!("inverted time window on {db}.{table}, returning empty result");
        let labels = if with_ground_truth {
            ground_truth.map(|_| Vec::new())
        } else {
            None
        };
        return Ok((Dataset::empty(), labels));
    }

    let mut indices: Vec<usize> = stored
        .timestamps
        .iter()
        .enumerate()
        .filter(|&(_, &ts)| window.contains(ts))
        .map(|(i, _)| i)
        .collect();

    if temporal {
        indices.sort_by_key(|&i| stored.timestamps[i]);
    }

    let rows: Vec<Vec<f64>> = indices.iter().map(|&i| stored.rows[i].clone()).collect();

    // Alignment is guaranteed by construction; constructor errors here
    // would indicate a corrupted table
    let dataset = if temporal {
        let timestamps = indices.iter().map(|&i| stored.timestamps[i]).collect();
        Dataset::with_timestamps(rows, timestamps).unwrap_or_else(|_| Dataset::empty())
    } else {
        Dataset::from_rows(rows).unwrap_or_else(|_| Dataset::empty())
    };

    let labels = if with_ground_truth {
        ground_truth.map(|all| indices.iter().map(|&i| all[i]).collect())
    } else {
        None
    };

    log::debug!(
        "query on {db}.{table}: {} of {} rows selected (temporal: {temporal})",
        dataset.n_rows(),
        stored.timestamps.len()
    );
    Ok((dataset, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::connection::{connect, Table};
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Four rows inserted out of time order, alternating labels.
    fn seeded_connection() -> (Connection, Vec<Label>) {
        let mut conn = connect("127.0.0.1", "root", "root").unwrap();
        conn.put_table(
            "db",
            "t",
            Table {
                time_column: "ts".to_string(),
                timestamps: vec![ts(7, 25), ts(7, 5), ts(8, 10), ts(7, 15)],
                rows: vec![
                    vec![1.0, 1.0],
                    vec![2.0, 2.0],
                    vec![3.0, 3.0],
                    vec![4.0, 4.0],
                ],
            },
        );
        let labels = vec![Label::Outlier, Label::Inlier, Label::Inlier, Label::Outlier];
        (conn, labels)
    }

    #[test]
    fn test_window_filters_inclusively() {
        let (conn, labels) = seeded_connection();
        let window = TimeWindow::new(Some(ts(7, 15)), Some(ts(8, 10)));
        let (data, gt) =
            query_data(&conn, "db", "t", "ts", Some(&labels), window, false, true).unwrap();
        // Rows at 7-25, 8-10 and 7-15 are in range (bounds inclusive)
        assert_eq!(data.n_rows(), 3);
        assert_eq!(gt.unwrap(), vec![Label::Outlier, Label::Inlier, Label::Outlier]);
    }

    #[test]
    fn test_non_temporal_omits_timestamps() {
        let (conn, labels) = seeded_connection();
        let (data, _) = query_data(
            &conn,
            "db",
            "t",
            "ts",
            Some(&labels),
            TimeWindow::unbounded(),
            false,
            true,
        )
        .unwrap();
        assert!(data.timestamps().is_none());
        // Insertion order preserved
        assert_eq!(data.row(0), &[1.0, 1.0]);
    }

    #[test]
    fn test_short_ground_truth_rejected() {
        let (conn, labels) = seeded_connection();
        let err = query_data(
            &conn,
            "db",
            "t",
            "ts",
            Some(&labels[..2]),
            TimeWindow::unbounded(),
            false,
            true,
        )
        .unwrap_err();
        assert_eq!(
            err,
            StoreError::GroundTruthMismatch {
                db: "db".to_string(),
                table: "t".to_string(),
                labels: 2,
                rows: 4,
            }
        );
    }

    #[test]
    fn test_temporal_ordering() {
        let (conn, labels) = seeded_connection();
        let (data, gt) = query_data(
            &conn,
            "db",
            "t",
            "ts",
            Some(&labels),
            TimeWindow::unbounded(),
            true,
            true,
        )
        .unwrap();
        let timestamps = data.timestamps().unwrap();
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
        // Rows and labels follow the reordering together
        assert_eq!(data.row(0), &[2.0, 2.0]);
        assert_eq!(
            gt.unwrap(),
            vec![Label::Inlier, Label::Outlier, Label::Outlier, Label::Inlier]
        );
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let (conn, labels) = seeded_connection();
        let window = TimeWindow::new(Some(ts(8, 1)), Some(ts(7, 1)));
        let (data, gt) =
            query_data(&conn, "db", "t", "ts", Some(&labels), window, false, true).unwrap();
        assert_eq!(data.n_rows(), 0);
        assert_eq!(gt.unwrap().len(), 0);
    }

    #[test]
    fn test_ground_truth_suppressed() {
        let (conn, labels) = seeded_connection();
        let (_, gt) = query_data(
            &conn,
            "db",
            "t",
            "ts",
            Some(&labels),
            TimeWindow::unbounded(),
            false,
            false,
        )
        .unwrap();
        assert!(gt.is_none());
    }

    #[test]
    fn test_ground_truth_absent_upstream() {
        let (conn, _) = seeded_connection();
        let (_, gt) = query_data(
            &conn,
            "db",
            "t",
            "ts",
            None,
            TimeWindow::unbounded(),
            false,
            true,
        )
        .unwrap();
        assert!(gt.is_none());
    }

    #[test]
    fn test_missing_column() {
        let (conn, _) = seeded_connection();
        let err = query_data(
            &conn,
            "db",
            "t",
            "wrong",
            None,
            TimeWindow::unbounded(),
            false,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::MissingColumn { .. }));
    }
}
