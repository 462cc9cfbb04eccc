// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The report pipeline: select → filter → aggregate → sort → project.
//!
//! Pure over its inputs: responses are borrowed, never modified, and the
//! output is freshly built rows.

use crate::aggregate::aggregate;
use crate::filter::matches_all;
use crate::row::{Cell, FieldLookup, ProjectedRow, Row};
use crate::sort::sort_rows;
use formflow_domain::{ReportVisualization, Response};
use tracing::debug;

/// Runs one visualization over a response collection.
///
/// # Arguments
///
/// * `visualization` - The visualization definition
/// * `responses` - Every candidate response; only those of the
///   visualization's source forms are considered
///
/// # Returns
///
/// The projected rows, in output order.
#[must_use]
pub fn run(visualization: &ReportVisualization, responses: &[Response]) -> Vec<ProjectedRow> {
    let rows: Vec<Row<'_>> = run_rows(visualization, responses);
    project(visualization, &rows)
}

/// Runs every stage except projection.
///
/// Useful when the caller needs full rows rather than chart-ready cells.
#[must_use]
pub fn run_rows<'a>(visualization: &ReportVisualization, responses: &'a [Response]) -> Vec<Row<'a>> {
    let selected: Vec<&'a Response> = responses
        .iter()
        .filter(|response| visualization.reads_form(&response.form_id))
        .collect();

    let filtered: Vec<&'a Response> = selected
        .iter()
        .copied()
        .filter(|response| matches_all(&visualization.filters, response))
        .collect();

    debug!(
        visualization_id = %visualization.id,
        candidates = responses.len(),
        selected = selected.len(),
        filtered = filtered.len(),
        "Filtered responses"
    );

    let rows: Vec<Row<'a>> = aggregate(
        &filtered,
        visualization.group_by(),
        &visualization.selected_fields,
    );

    match &visualization.sort {
        Some(spec) => sort_rows(rows, spec),
        None => rows,
    }
}

/// Projects rows onto the visualization's fields.
///
/// Ungrouped rows carry the selected fields and their response id. Grouped
/// rows carry the group-by fields, then the remaining selected fields, plus
/// the group label and count.
#[must_use]
pub fn project(visualization: &ReportVisualization, rows: &[Row<'_>]) -> Vec<ProjectedRow> {
    let group_by: &[String] = visualization.group_by();
    let mut columns: Vec<&String> = group_by.iter().collect();
    for field_id in &visualization.selected_fields {
        if !columns.contains(&field_id) {
            columns.push(field_id);
        }
    }

    rows.iter()
        .map(|row| {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|field_id| Cell {
                    field_id: (*field_id).clone(),
                    value: row.field_value(field_id).into_owned(),
                })
                .collect();
            match row {
                Row::Response(response) => ProjectedRow {
                    response_id: Some(response.id.clone()),
                    group: None,
                    count: None,
                    cells,
                },
                Row::Group(group) => ProjectedRow {
                    response_id: None,
                    group: Some(group.key.label()),
                    count: Some(group.count),
                    cells,
                },
            }
        })
        .collect()
}
