// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report execution for the charting layer.

use crate::repository::ResponseRepository;
use formflow::{ProjectedRow, run};
use formflow_domain::{Report, Response};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Runs every visualization of a report.
///
/// Responses are fetched once per source form and shared between the
/// visualizations that read it.
///
/// # Arguments
///
/// * `report` - The report to execute
/// * `repository` - Where responses are read from
///
/// # Returns
///
/// The projected rows of each visualization, keyed by visualization id.
#[must_use]
pub fn run_report<R: ResponseRepository>(
    report: &Report,
    repository: &R,
) -> BTreeMap<String, Vec<ProjectedRow>> {
    let mut by_form: HashMap<&str, Vec<Response>> = HashMap::new();
    for form_id in report.source_form_ids() {
        by_form
            .entry(form_id)
            .or_insert_with(|| repository.responses_by_form(form_id));
    }

    let mut results: BTreeMap<String, Vec<ProjectedRow>> = BTreeMap::new();
    for visualization in &report.visualizations {
        let mut responses: Vec<Response> = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        for form_id in &visualization.source_form_ids {
            if seen.contains(&form_id.as_str()) {
                continue;
            }
            seen.push(form_id.as_str());
            if let Some(form_responses) = by_form.get(form_id.as_str()) {
                responses.extend(form_responses.iter().cloned());
            }
        }

        let rows: Vec<ProjectedRow> = run(visualization, &responses);
        info!(
            report_id = %report.id,
            visualization_id = %visualization.id,
            responses = responses.len(),
            rows = rows.len(),
            "Ran visualization"
        );
        results.insert(visualization.id.clone(), rows);
    }

    results
}
