// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filter evaluation.
//!
//! Evaluates declarative report filters against one response at a time.
//! Evaluation is total: operator/value mismatches resolve to "no match".

use crate::error::CoreError;
use formflow_domain::{FilterOperand, FilterOperator, ReportFilter, Response, Value, ValueKind};
use tracing::debug;

/// Evaluates one filter against a response, surfacing type mismatches.
///
/// # Arguments
///
/// * `filter` - The filter to evaluate
/// * `response` - The response whose value is tested
///
/// # Returns
///
/// * `Ok(true)` if the response's value satisfies the filter
/// * `Ok(false)` if it does not, including when the value is Absent
///
/// # Errors
///
/// Returns `CoreError::TypeMismatch` if:
/// - `contains` is applied to a value that is neither text nor a list
/// - `greater`, `less` or `between` cannot coerce both sides to numbers
/// - The operand shape does not fit the operator (a range outside
///   `between`, or a single value for `between`)
pub fn try_evaluate(filter: &ReportFilter, response: &Response) -> Result<bool, CoreError> {
    evaluate_value(filter, response.value(&filter.field_id))
}

/// Evaluates one filter against a response.
///
/// Type mismatches are logged and treated as a non-match.
#[must_use]
pub fn evaluate(filter: &ReportFilter, response: &Response) -> bool {
    match try_evaluate(filter, response) {
        Ok(matched) => matched,
        Err(err) => {
            debug!(
                response_id = %response.id,
                field_id = %filter.field_id,
                error = %err,
                "Filter evaluation treated as non-match"
            );
            false
        }
    }
}

/// Returns true if the response satisfies every filter.
///
/// An empty filter set matches everything.
#[must_use]
pub fn matches_all(filters: &[ReportFilter], response: &Response) -> bool {
    filters.iter().all(|filter| evaluate(filter, response))
}

fn evaluate_value(filter: &ReportFilter, value: &Value) -> Result<bool, CoreError> {
    let mismatch = |value_kind: ValueKind| CoreError::TypeMismatch {
        field_id: filter.field_id.clone(),
        operator: filter.operator.as_str(),
        value_kind,
    };

    match (filter.operator, &filter.operand) {
        (FilterOperator::Equals, FilterOperand::Value(expected)) => {
            Ok(value.loosely_equals(expected))
        }
        (FilterOperator::Contains, FilterOperand::Value(needle)) => {
            contains(value, needle).ok_or_else(|| mismatch(value.kind()))
        }
        (FilterOperator::Greater, FilterOperand::Value(bound)) => {
            compare_numbers(value, &[bound], |v, b| v > b[0]).map_err(mismatch)
        }
        (FilterOperator::Less, FilterOperand::Value(bound)) => {
            compare_numbers(value, &[bound], |v, b| v < b[0]).map_err(mismatch)
        }
        (FilterOperator::Between, FilterOperand::Range(low, high)) => {
            compare_numbers(value, &[low, high], |v, b| b[0] <= v && v <= b[1]).map_err(mismatch)
        }
        (_, FilterOperand::Value(operand) | FilterOperand::Range(operand, _)) => {
            Err(mismatch(operand.kind()))
        }
    }
}

/// Coerces the value and every bound to numbers and applies the predicate.
///
/// Absent values never match and are not a mismatch. Returns the kind of the
/// first side that fails to coerce.
fn compare_numbers(
    value: &Value,
    bounds: &[&Value],
    predicate: impl Fn(f64, &[f64]) -> bool,
) -> Result<bool, ValueKind> {
    if value.is_absent() {
        return Ok(false);
    }

    let number: f64 = value.as_number().ok_or_else(|| value.kind())?;
    let mut coerced: Vec<f64> = Vec::with_capacity(bounds.len());
    for bound in bounds {
        coerced.push(bound.as_number().ok_or_else(|| bound.kind())?);
    }

    Ok(predicate(number, &coerced))
}

/// Containment shared by filters and conditional rules.
///
/// - Text contains each needle item as a substring.
/// - A string list contains each needle item as a member.
/// - Absent contains nothing.
///
/// Needles may be text, a string list (every item must be contained), or a
/// number/boolean compared by canonical form. Returns `None` when either
/// side has a kind containment is not defined for.
pub(crate) fn contains(value: &Value, needle: &Value) -> Option<bool> {
    let items: Vec<String> = match needle {
        Value::Text(text) => vec![text.clone()],
        Value::StringList(items) => items.clone(),
        Value::Number(_) | Value::Boolean(_) => vec![needle.canonical()?],
        Value::Absent | Value::FileRefList(_) => return None,
    };

    match value {
        Value::Absent => Some(false),
        Value::Text(text) => Some(items.iter().all(|item| text.contains(item.as_str()))),
        Value::StringList(members) => Some(items.iter().all(|item| members.contains(item))),
        Value::Number(_) | Value::Boolean(_) | Value::FileRefList(_) => None,
    }
}
