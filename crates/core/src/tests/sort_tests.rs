// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for row ordering.

use crate::{compare_values, sort_rows};
use formflow_domain::{Response, SortDirection, SortSpec, Value};
use std::cmp::Ordering;

use super::helpers::create_test_response;

fn named(id: &str, name: Value) -> Response {
    create_test_response(id, "form-1", &[("name", name)])
}

fn ids(rows: &[Response]) -> Vec<&str> {
    rows.iter().map(|response| response.id.as_str()).collect()
}

#[test]
fn test_descending_puts_absent_last() {
    let rows: Vec<Response> = vec![
        named("r-b", Value::text("b")),
        create_test_response("r-absent", "form-1", &[]),
        named("r-a", Value::text("a")),
    ];

    let sorted: Vec<Response> = sort_rows(rows, &SortSpec::new("name", SortDirection::Desc));

    assert_eq!(ids(&sorted), vec!["r-b", "r-a", "r-absent"]);
}

#[test]
fn test_ascending_puts_absent_first() {
    let rows: Vec<Response> = vec![
        named("r-b", Value::text("b")),
        create_test_response("r-absent", "form-1", &[]),
        named("r-a", Value::text("a")),
    ];

    let sorted: Vec<Response> = sort_rows(rows, &SortSpec::new("name", SortDirection::Asc));

    assert_eq!(ids(&sorted), vec!["r-absent", "r-a", "r-b"]);
}

#[test]
fn test_sort_is_stable_in_both_directions() {
    let rows: Vec<Response> = vec![
        named("r-1", Value::Number(1.0)),
        named("r-2", Value::Number(2.0)),
        named("r-3", Value::Number(1.0)),
        named("r-4", Value::Number(2.0)),
    ];

    let ascending: Vec<Response> =
        sort_rows(rows.clone(), &SortSpec::new("name", SortDirection::Asc));
    let descending: Vec<Response> = sort_rows(rows, &SortSpec::new("name", SortDirection::Desc));

    assert_eq!(ids(&ascending), vec!["r-1", "r-3", "r-2", "r-4"]);
    assert_eq!(ids(&descending), vec!["r-2", "r-4", "r-1", "r-3"]);
}

#[test]
fn test_numbers_compare_numerically() {
    let rows: Vec<Response> = vec![
        named("r-10", Value::Number(10.0)),
        named("r-9", Value::Number(9.0)),
    ];

    let sorted: Vec<Response> = sort_rows(rows, &SortSpec::new("name", SortDirection::Asc));

    assert_eq!(ids(&sorted), vec!["r-9", "r-10"]);
}

#[test]
fn test_text_compares_case_sensitively() {
    assert_eq!(
        compare_values(&Value::text("Z"), &Value::text("a")),
        Ordering::Less
    );
}

#[test]
fn test_mixed_kinds_follow_fixed_order() {
    let ordered: Vec<Value> = vec![
        Value::Absent,
        Value::Number(100.0),
        Value::Boolean(false),
        Value::text("a"),
        Value::list(["a"]),
        Value::FileRefList(Vec::new()),
    ];

    for pair in ordered.windows(2) {
        assert_eq!(compare_values(&pair[0], &pair[1]), Ordering::Less);
        assert_eq!(compare_values(&pair[1], &pair[0]), Ordering::Greater);
    }
}

#[test]
fn test_nan_has_a_defined_position() {
    assert_eq!(
        compare_values(&Value::Number(f64::NAN), &Value::Number(f64::NAN)),
        Ordering::Equal
    );
    assert_eq!(
        compare_values(&Value::Number(1.0), &Value::Number(f64::NAN)),
        Ordering::Less
    );
}
