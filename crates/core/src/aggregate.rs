// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grouping of responses into aggregated rows.

use crate::error::CoreError;
use crate::row::{GroupKey, GroupRow, Row};
use formflow_domain::{Response, Value};
use std::collections::HashMap;
use tracing::debug;

/// Running state of one selected field within a group.
#[derive(Debug, Clone, PartialEq)]
enum Accumulator {
    /// No value seen yet.
    Empty,
    /// Only non-numeric values seen; holds the first one.
    FirstSeen(Value),
    /// At least one number seen; holds the running sum.
    Sum(f64),
}

impl Accumulator {
    fn add(&mut self, field_id: &str, value: &Value) -> Result<(), CoreError> {
        match value {
            Value::Absent => {}
            Value::Number(n) => match self {
                Self::Sum(sum) => *sum += n,
                Self::Empty | Self::FirstSeen(_) => *self = Self::Sum(*n),
            },
            other => match self {
                Self::Empty => *self = Self::FirstSeen(other.clone()),
                Self::FirstSeen(_) => {}
                Self::Sum(_) => {
                    return Err(CoreError::TypeMismatch {
                        field_id: field_id.to_string(),
                        operator: "sum",
                        value_kind: other.kind(),
                    });
                }
            },
        }
        Ok(())
    }

    fn finish(self) -> Value {
        match self {
            Self::Empty => Value::Absent,
            Self::FirstSeen(value) => value,
            Self::Sum(sum) => Value::Number(sum),
        }
    }
}

/// A group under construction.
struct GroupBuilder {
    key: GroupKey,
    count: u64,
    group_values: Vec<(String, Value)>,
    accumulators: Vec<(String, Accumulator)>,
}

impl GroupBuilder {
    fn new(key: GroupKey, response: &Response, group_by: &[String], summed: &[&String]) -> Self {
        Self {
            key,
            count: 0,
            group_values: group_by
                .iter()
                .map(|field_id| (field_id.clone(), response.value(field_id).clone()))
                .collect(),
            accumulators: summed
                .iter()
                .map(|field_id| ((*field_id).clone(), Accumulator::Empty))
                .collect(),
        }
    }

    fn add(&mut self, response: &Response) {
        self.count += 1;
        for (field_id, accumulator) in &mut self.accumulators {
            if let Err(err) = accumulator.add(field_id, response.value(field_id)) {
                debug!(
                    response_id = %response.id,
                    error = %err,
                    "Skipping non-numeric contribution to group sum"
                );
            }
        }
    }

    fn finish(self) -> GroupRow {
        let mut values: HashMap<String, Value> = self.group_values.into_iter().collect();
        for (field_id, accumulator) in self.accumulators {
            let value: Value = accumulator.finish();
            if !value.is_absent() {
                values.insert(field_id, value);
            }
        }
        GroupRow {
            key: self.key,
            count: self.count,
            values,
        }
    }
}

/// Builds the group key of a response.
#[must_use]
pub fn group_key(response: &Response, group_by: &[String]) -> GroupKey {
    GroupKey(
        group_by
            .iter()
            .map(|field_id| response.value(field_id).group_key_component())
            .collect(),
    )
}

/// Groups responses and accumulates counts and sums.
///
/// # Arguments
///
/// * `responses` - The (already filtered) responses
/// * `group_by` - Fields forming the group key; empty disables grouping
/// * `selected` - Fields carried into each row
///
/// # Returns
///
/// With no group-by fields, one row per response in input order. Otherwise
/// one row per distinct group key in order of first occurrence. Responses
/// with an Absent group-by value form their own group rather than being
/// dropped. Selected fields that are not group-by fields are summed where
/// numeric, otherwise carry the first value seen. A selected field with no
/// answers in the group is left out of the row, so a `count` lookup falls
/// back to the group size only when no response answered a `count` field.
#[must_use]
pub fn aggregate<'a>(
    responses: &[&'a Response],
    group_by: &[String],
    selected: &[String],
) -> Vec<Row<'a>> {
    if group_by.is_empty() {
        return responses.iter().map(|&response| Row::Response(response)).collect();
    }

    let summed: Vec<&String> = selected
        .iter()
        .filter(|field_id| !group_by.contains(*field_id))
        .collect();

    let mut groups: Vec<GroupBuilder> = Vec::new();
    let mut slot_by_key: HashMap<GroupKey, usize> = HashMap::new();

    for response in responses {
        let key: GroupKey = group_key(response, group_by);
        let slot: usize = match slot_by_key.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot: usize = groups.len();
                groups.push(GroupBuilder::new(key.clone(), response, group_by, &summed));
                slot_by_key.insert(key, slot);
                slot
            }
        };
        groups[slot].add(response);
    }

    debug!(
        responses = responses.len(),
        groups = groups.len(),
        "Aggregated responses"
    );

    groups
        .into_iter()
        .map(|group| Row::Group(group.finish()))
        .collect()
}
