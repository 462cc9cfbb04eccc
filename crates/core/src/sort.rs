// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stable ordering of rows by one field.
//!
//! ## Ordering Rules
//!
//! Values of different kinds order by kind:
//! Absent < Number < Boolean < Text < `StringList` < `FileRefList`.
//!
//! Within a kind:
//! - Numbers compare numerically (`f64::total_cmp`)
//! - Booleans order `false` before `true`
//! - Text compares case-sensitively by code point
//! - String lists compare lexicographically
//! - File lists compare lexicographically by (name, id)
//!
//! The order is total, so sorting never fails on heterogeneous data.

use crate::row::FieldLookup;
use formflow_domain::{SortDirection, SortSpec, Value};
use std::cmp::Ordering;

/// Compares two values under the total cross-kind order.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        (Value::StringList(x), Value::StringList(y)) => x.cmp(y),
        (Value::FileRefList(x), Value::FileRefList(y)) => x
            .iter()
            .map(|file| (&file.name, &file.id))
            .cmp(y.iter().map(|file| (&file.name, &file.id))),
        _ => a.kind().cmp(&b.kind()),
    }
}

/// Sorts rows by a field.
///
/// The sort is stable: rows with equal keys keep their input order, in both
/// directions. Absent values come first ascending and last descending.
///
/// # Arguments
///
/// * `rows` - The rows to order
/// * `spec` - The sort field and direction
#[must_use]
pub fn sort_rows<T: FieldLookup>(mut rows: Vec<T>, spec: &SortSpec) -> Vec<T> {
    rows.sort_by(|a, b| {
        let ordering: Ordering = compare_values(
            &a.field_value(&spec.field_id),
            &b.field_value(&spec.field_id),
        );
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    rows
}
