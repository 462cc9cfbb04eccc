// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Evaluation engine for form schemas and report visualizations.
//!
//! Every operation here is a synchronous, pure function over borrowed
//! snapshots: navigation over `(schema, values)` and report computation over
//! `(visualization, responses)`. Nothing is mutated in place.

mod aggregate;
mod check;
mod error;
mod filter;
mod navigator;
mod pipeline;
mod row;
mod sort;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, group_key};
pub use check::{CheckMode, check_response};
pub use error::CoreError;
pub use filter::{evaluate, matches_all, try_evaluate};
pub use navigator::{Cursor, Navigator, Position};
pub use pipeline::{project, run, run_rows};
pub use row::{
    COUNT_FIELD, Cell, FieldLookup, GroupKey, GroupRow, MISSING_MARKER, ProjectedRow, Row,
};
pub use sort::{compare_values, sort_rows};
