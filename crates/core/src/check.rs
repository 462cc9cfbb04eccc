// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Response conformance checks against a schema.

use crate::navigator::Navigator;
use formflow_domain::{Field, FormSchema, ResponseIssue, ResponseValues, check_value};
use std::collections::HashSet;

/// How strictly a response is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckMode {
    /// Saving a draft: answers must conform, but may be incomplete.
    Draft,
    /// Submitting: required fields on the navigation path must be answered.
    Submit,
}

/// Checks a set of answers against a schema.
///
/// # Arguments
///
/// * `schema` - The validated schema
/// * `values` - The answers to check
/// * `mode` - Whether required fields are enforced
///
/// # Returns
///
/// Every issue found: per-field conformance issues in document order, then
/// answers for unknown fields sorted by id, then (in Submit mode) missing
/// required answers in path order. Required fields skipped by a conditional
/// jump are not reported.
#[must_use]
pub fn check_response(
    schema: &FormSchema,
    values: &ResponseValues,
    mode: CheckMode,
) -> Vec<ResponseIssue> {
    let mut issues: Vec<ResponseIssue> = Vec::new();
    let mut known: HashSet<&str> = HashSet::new();

    for field in schema.flatten_fields() {
        known.insert(field.id.as_str());
        if let Some(value) = values.get(&field.id) {
            issues.extend(check_value(field, value));
        }
    }

    let mut unknown: Vec<&String> = values
        .keys()
        .filter(|field_id| !known.contains(field_id.as_str()))
        .collect();
    unknown.sort();
    issues.extend(unknown.into_iter().map(|field_id| ResponseIssue::UnknownField {
        field_id: field_id.clone(),
    }));

    if mode == CheckMode::Submit {
        let navigator: Navigator<'_> = Navigator::new(schema);
        issues.extend(
            navigator
                .path(values)
                .into_iter()
                .filter(|field| is_missing_required(field, values))
                .map(|field| ResponseIssue::RequiredMissing {
                    field_id: field.id.clone(),
                }),
        );
    }

    issues
}

fn is_missing_required(field: &Field, values: &ResponseValues) -> bool {
    field.required
        && !field.is_section()
        && values.get(&field.id).is_none_or(formflow_domain::Value::is_empty)
}
