// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use formflow_domain::{
    ConditionalRule, Field, FieldKind, FormSchema, ReportVisualization, Response, ResponseValues,
    RuleOperator, RuleValue, Value,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const fn create_test_time() -> OffsetDateTime {
    datetime!(2026-03-01 9:00 UTC)
}

pub fn create_test_values(entries: &[(&str, Value)]) -> ResponseValues {
    entries
        .iter()
        .map(|(field_id, value)| ((*field_id).to_string(), value.clone()))
        .collect()
}

pub fn create_test_response(id: &str, form_id: &str, entries: &[(&str, Value)]) -> Response {
    Response::new_draft(id, form_id, "user-1", create_test_time())
        .with_values(create_test_values(entries), create_test_time())
        .expect("draft accepts values")
}

/// Two fields: a select `a` that ends the form on "y", then a text `b`.
pub fn create_branching_schema() -> FormSchema {
    FormSchema::new(
        "form-branch",
        "Branching",
        vec![
            Field::new("a", FieldKind::Select, "A")
                .with_options(&["x", "y"])
                .with_rule(ConditionalRule::jump_to_end(
                    "a",
                    RuleOperator::Equals,
                    RuleValue::Single(String::from("y")),
                )),
            Field::new("b", FieldKind::Text, "B"),
        ],
    )
}

/// A survey with a standalone field, a branching choice and a section.
///
/// Flattened order: name, `has_lab`, lab, `lab_size`, equipment, comments.
pub fn create_test_schema() -> FormSchema {
    FormSchema::new(
        "form-1",
        "Center survey",
        vec![
            Field::new("name", FieldKind::Text, "Center name").required(),
            Field::new("has_lab", FieldKind::Radio, "Has a lab?")
                .with_options(&["yes", "no"])
                .required()
                .with_rule(ConditionalRule::jump_to_field(
                    "has_lab",
                    RuleOperator::Equals,
                    RuleValue::Single(String::from("no")),
                    "comments",
                )),
            Field::section(
                "lab",
                "Lab details",
                vec![
                    Field::new("lab_size", FieldKind::Number, "Lab size").required(),
                    Field::new("equipment", FieldKind::Checkbox, "Equipment")
                        .with_options(&["printer", "laser", "lathe"]),
                ],
            ),
            Field::new("comments", FieldKind::TextArea, "Comments"),
        ],
    )
}

pub fn create_test_visualization(form_ids: &[&str], selected: &[&str]) -> ReportVisualization {
    ReportVisualization {
        id: String::from("viz-1"),
        chart_kind: formflow_domain::ChartKind::Table,
        title: String::from("Test visualization"),
        source_form_ids: form_ids.iter().map(|id| (*id).to_string()).collect(),
        selected_fields: selected.iter().map(|id| (*id).to_string()).collect(),
        filters: Vec::new(),
        group_by_fields: None,
        sort: None,
    }
}
