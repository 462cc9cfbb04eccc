// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rows flowing through the report pipeline.

use formflow_domain::{Response, Value};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;

/// Field id a group row answers with its response count, unless the group
/// carries a summed value of its own under that id.
pub const COUNT_FIELD: &str = "count";

/// Label used for a group-by component whose value is Absent.
pub const MISSING_MARKER: &str = "(missing)";

/// Anything the sorter can order by field.
pub trait FieldLookup {
    /// Returns the value of a field, or Absent.
    fn field_value(&self, field_id: &str) -> Cow<'_, Value>;
}

impl FieldLookup for Response {
    fn field_value(&self, field_id: &str) -> Cow<'_, Value> {
        Cow::Borrowed(self.value(field_id))
    }
}

impl<T: FieldLookup + ?Sized> FieldLookup for &T {
    fn field_value(&self, field_id: &str) -> Cow<'_, Value> {
        (**self).field_value(field_id)
    }
}

/// Identifies an aggregation bucket.
///
/// One component per group-by field: the group key component of its value,
/// or `None` when the value is Absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey(pub Vec<Option<String>>);

impl GroupKey {
    /// Renders the key for display, e.g. `North / (missing)`.
    #[must_use]
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(|component| component.as_deref().unwrap_or(MISSING_MARKER))
            .collect::<Vec<&str>>()
            .join(" / ")
    }
}

/// The aggregate of every response sharing a group key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    /// The bucket identity.
    pub key: GroupKey,
    /// Number of responses in the group.
    pub count: u64,
    /// Group-by values plus summed or first-seen selected values. Selected
    /// fields nobody answered are omitted.
    pub values: HashMap<String, Value>,
}

impl FieldLookup for GroupRow {
    fn field_value(&self, field_id: &str) -> Cow<'_, Value> {
        match self.values.get(field_id) {
            Some(value) => Cow::Borrowed(value),
            #[allow(clippy::cast_precision_loss)]
            None if field_id == COUNT_FIELD => Cow::Owned(Value::Number(self.count as f64)),
            None => Cow::Owned(Value::Absent),
        }
    }
}

/// A pipeline row: a response passed through, or an aggregated group.
#[derive(Debug, Clone, PartialEq)]
pub enum Row<'a> {
    /// An ungrouped response, borrowed from the input collection.
    Response(&'a Response),
    /// An aggregated group.
    Group(GroupRow),
}

impl FieldLookup for Row<'_> {
    fn field_value(&self, field_id: &str) -> Cow<'_, Value> {
        match self {
            Self::Response(response) => response.field_value(field_id),
            Self::Group(group) => group.field_value(field_id),
        }
    }
}

/// One field of a projected row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// The field id.
    pub field_id: String,
    /// The field value.
    pub value: Value,
}

/// A row projected for the chart layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRow {
    /// The source response, for ungrouped rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
    /// The group label, for grouped rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// The group size, for grouped rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Values in projection order.
    pub cells: Vec<Cell>,
}

impl ProjectedRow {
    /// Returns the value of a projected field, if it was projected.
    #[must_use]
    pub fn cell(&self, field_id: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|cell| cell.field_id == field_id)
            .map(|cell| &cell.value)
    }
}
