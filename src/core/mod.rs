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

//! Core data model shared by every stage of the pipeline.

pub mod dataset;
pub mod result;

pub use dataset::{Dataset, TimeWindow};
pub use result::{DetectionResult, Label};
