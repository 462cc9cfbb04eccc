// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the report pipeline.

use crate::{ProjectedRow, run};
use formflow_domain::{
    FilterOperator, ReportFilter, ReportVisualization, Response, SortDirection, SortSpec, Value,
};

use super::helpers::{create_test_response, create_test_visualization};

fn create_regional_responses() -> Vec<Response> {
    vec![
        create_test_response(
            "r-1",
            "form-1",
            &[("region", Value::text("N")), ("count_me", Value::Number(3.0))],
        ),
        create_test_response(
            "r-2",
            "form-1",
            &[("region", Value::text("N")), ("count_me", Value::Number(4.0))],
        ),
        create_test_response(
            "r-3",
            "form-1",
            &[("region", Value::text("S")), ("count_me", Value::Number(1.0))],
        ),
        create_test_response(
            "r-other",
            "form-2",
            &[("region", Value::text("S")), ("count_me", Value::Number(100.0))],
        ),
    ]
}

#[test]
fn test_zero_filter_ungrouped_run_returns_responses_unchanged() {
    let responses: Vec<Response> = create_regional_responses();
    let visualization: ReportVisualization =
        create_test_visualization(&["form-1"], &["region", "count_me"]);

    let rows: Vec<ProjectedRow> = run(&visualization, &responses);

    assert_eq!(rows.len(), 3);
    for (row, response) in rows.iter().zip(&responses) {
        assert_eq!(row.response_id.as_deref(), Some(response.id.as_str()));
        assert_eq!(row.group, None);
        assert_eq!(row.cell("region"), Some(response.value("region")));
        assert_eq!(row.cell("count_me"), Some(response.value("count_me")));
    }
}

#[test]
fn test_run_selects_only_source_forms() {
    let responses: Vec<Response> = create_regional_responses();
    let visualization: ReportVisualization = create_test_visualization(&["form-2"], &["region"]);

    let rows: Vec<ProjectedRow> = run(&visualization, &responses);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].response_id.as_deref(), Some("r-other"));
}

#[test]
fn test_grouped_sorted_run() {
    let responses: Vec<Response> = create_regional_responses();
    let mut visualization: ReportVisualization =
        create_test_visualization(&["form-1"], &["count_me", "region"]);
    visualization.group_by_fields = Some(vec![String::from("region")]);
    visualization.sort = Some(SortSpec::new("count_me", SortDirection::Asc));

    let rows: Vec<ProjectedRow> = run(&visualization, &responses);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].group.as_deref(), Some("S"));
    assert_eq!(rows[0].count, Some(1));
    assert_eq!(rows[1].group.as_deref(), Some("N"));
    assert_eq!(rows[1].count, Some(2));
    assert_eq!(rows[1].cell("count_me"), Some(&Value::Number(7.0)));

    let columns: Vec<&str> = rows[1]
        .cells
        .iter()
        .map(|cell| cell.field_id.as_str())
        .collect();
    assert_eq!(columns, vec!["region", "count_me"]);
}

#[test]
fn test_grouped_run_can_sort_by_count() {
    let responses: Vec<Response> = create_regional_responses();
    let mut visualization: ReportVisualization =
        create_test_visualization(&["form-1"], &["count"]);
    visualization.group_by_fields = Some(vec![String::from("region")]);
    visualization.sort = Some(SortSpec::new("count", SortDirection::Desc));

    let rows: Vec<ProjectedRow> = run(&visualization, &responses);

    assert_eq!(rows[0].group.as_deref(), Some("N"));
    assert_eq!(rows[0].cell("count"), Some(&Value::Number(2.0)));
}

#[test]
fn test_filters_apply_before_grouping() {
    let responses: Vec<Response> = create_regional_responses();
    let mut visualization: ReportVisualization =
        create_test_visualization(&["form-1"], &["count_me"]);
    visualization.filters = vec![ReportFilter::new(
        "count_me",
        FilterOperator::Greater,
        Value::Number(3.5),
    )];
    visualization.group_by_fields = Some(vec![String::from("region")]);

    let rows: Vec<ProjectedRow> = run(&visualization, &responses);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].group.as_deref(), Some("N"));
    assert_eq!(rows[0].count, Some(1));
    assert_eq!(rows[0].cell("count_me"), Some(&Value::Number(4.0)));
}

#[test]
fn test_run_does_not_mutate_inputs() {
    let responses: Vec<Response> = create_regional_responses();
    let snapshot: Vec<Response> = responses.clone();
    let mut visualization: ReportVisualization =
        create_test_visualization(&["form-1"], &["count_me"]);
    visualization.sort = Some(SortSpec::new("count_me", SortDirection::Desc));

    let first: Vec<ProjectedRow> = run(&visualization, &responses);
    let second: Vec<ProjectedRow> = run(&visualization, &responses);

    assert_eq!(responses, snapshot);
    assert_eq!(first, second);
}

#[test]
fn test_projected_rows_serialize_for_chart_layer() {
    let responses: Vec<Response> = create_regional_responses();
    let mut visualization: ReportVisualization =
        create_test_visualization(&["form-1"], &["count_me"]);
    visualization.group_by_fields = Some(vec![String::from("region")]);

    let rows: Vec<ProjectedRow> = run(&visualization, &responses);
    let json: serde_json::Value = serde_json::to_value(&rows[0]).unwrap();

    assert_eq!(json["group"], "N");
    assert_eq!(json["count"], 2);
    assert!(json.get("response_id").is_none());
    assert_eq!(json["cells"][1]["field_id"], "count_me");
    assert_eq!(json["cells"][1]["value"], 7.0);
}
