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

//! Dataset and time-window types.

use crate::error::DatasetError;
use chrono::NaiveDateTime;

/// An immutable, row-major feature matrix, optionally paired with one
/// timestamp per row when temporal ordering matters.
///
/// Row and column counts are fixed for the lifetime of a detection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Vec<f64>>,
    timestamps: Option<Vec<NaiveDateTime>>,
}

impl Dataset {
    /// Build a dataset from raw rows, validating rectangularity.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DatasetError> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            for (i, row) in rows.iter().enumerate() {
                if row.len() != expected {
                    return Err(DatasetError::RaggedRows {
                        row: i,
                        got: row.len(),
                        expected,
                    });
                }
            }
        }
        Ok(Dataset {
            rows,
            timestamps: None,
        })
    }

    /// Build a timestamped dataset. Timestamps must align with rows.
    pub fn with_timestamps(
        rows: Vec<Vec<f64>>,
        timestamps: Vec<NaiveDateTime>,
    ) -> Result<Self, DatasetError> {
        if rows.len() != timestamps.len() {
            return Err(DatasetError::TimestampMismatch {
                rows: rows.len(),
                timestamps: timestamps.len(),
            });
        }
        let mut dataset = Self::from_rows(rows)?;
        dataset.timestamps = Some(timestamps);
        Ok(dataset)
    }

    /// A dataset with zero rows (the empty-window result).
    pub fn empty() -> Self {
        Dataset {
            rows: Vec::new(),
            timestamps: None,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of features per row; 0 for an empty dataset.
    pub fn n_features(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn timestamps(&self) -> Option<&[NaiveDateTime]> {
        self.timestamps.as_deref()
    }
}

/// An inclusive time range; an absent bound leaves that side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl TimeWindow {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        TimeWindow { start, end }
    }

    /// The unbounded window: no filtering at all.
    pub fn unbounded() -> Self {
        TimeWindow::default()
    }

    /// An inverted window (start after end) selects nothing.
    pub fn is_inverted(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start > end,
            _ => false,
        }
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        if self.start.is_some_and(|start| ts < start) {
            return false;
        }
        if self.end.is_some_and(|end| ts > end) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_rectangular_validation() {
        let ok = Dataset::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(ok.is_ok());

        let ragged = Dataset::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            ragged,
            Err(DatasetError::RaggedRows { row: 1, .. })
        ));
    }

    #[test]
    fn test_timestamp_alignment() {
        let bad = Dataset::with_timestamps(vec![vec![1.0], vec![2.0]], vec![ts(1, 0)]);
        assert!(matches!(bad, Err(DatasetError::TimestampMismatch { .. })));

        let good =
            Dataset::with_timestamps(vec![vec![1.0], vec![2.0]], vec![ts(1, 0), ts(1, 1)]).unwrap();
        assert_eq!(good.n_rows(), 2);
        assert_eq!(good.timestamps().unwrap().len(), 2);
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let window = TimeWindow::new(Some(ts(10, 0)), Some(ts(20, 0)));
        assert!(window.contains(ts(10, 0)));
        assert!(window.contains(ts(20, 0)));
        assert!(window.contains(ts(15, 12)));
        assert!(!window.contains(ts(9, 23)));
        assert!(!window.contains(ts(20, 1)));
    }

    #[test]
    fn test_window_open_sides() {
        let open_start = TimeWindow::new(None, Some(ts(10, 0)));
        assert!(open_start.contains(ts(1, 0)));
        assert!(!open_start.contains(ts(11, 0)));

        assert!(TimeWindow::unbounded().contains(ts(31, 23)));
        assert!(!TimeWindow::unbounded().is_inverted());
    }

    #[test]
    fn test_inverted_window() {
        let inverted = TimeWindow::new(Some(ts(20, 0)), Some(ts(10, 0)));
        assert!(inverted.is_inverted());
    }
}
