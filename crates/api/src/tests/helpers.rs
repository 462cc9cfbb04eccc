// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use formflow_domain::{
    ChartKind, Field, FieldKind, FormSchema, FormStatus, Report, ReportVisualization, Response,
    ResponseValues, Value,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const fn create_test_time() -> OffsetDateTime {
    datetime!(2026-03-01 9:00 UTC)
}

pub const fn create_later_time() -> OffsetDateTime {
    datetime!(2026-03-02 9:00 UTC)
}

pub fn create_test_values(entries: &[(&str, Value)]) -> ResponseValues {
    entries
        .iter()
        .map(|(field_id, value)| ((*field_id).to_string(), value.clone()))
        .collect()
}

/// A published single-response form with one required and one optional field.
pub fn create_published_schema() -> FormSchema {
    FormSchema::new(
        "form-1",
        "Center census",
        vec![
            Field::new("region", FieldKind::Select, "Region")
                .with_options(&["N", "S"])
                .required(),
            Field::new("staff", FieldKind::Number, "Staff"),
        ],
    )
    .with_status(FormStatus::Published)
    .unwrap()
}

pub fn create_test_response(
    id: &str,
    form_id: &str,
    user_id: &str,
    entries: &[(&str, Value)],
) -> Response {
    Response::new_draft(id, form_id, user_id, create_test_time())
        .with_values(create_test_values(entries), create_test_time())
        .unwrap()
}

pub fn create_test_visualization(
    id: &str,
    form_ids: &[&str],
    selected: &[&str],
) -> ReportVisualization {
    ReportVisualization {
        id: id.to_string(),
        chart_kind: ChartKind::Bar,
        title: format!("Visualization {id}"),
        source_form_ids: form_ids.iter().map(|form_id| (*form_id).to_string()).collect(),
        selected_fields: selected.iter().map(|field_id| (*field_id).to_string()).collect(),
        filters: Vec::new(),
        group_by_fields: None,
        sort: None,
    }
}

pub fn create_test_report(visualizations: Vec<ReportVisualization>) -> Report {
    Report {
        id: String::from("report-1"),
        title: String::from("Census"),
        visualizations,
        created_by: String::from("admin-1"),
        academic_year_id: String::from("2025-2026"),
        is_public: false,
    }
}
