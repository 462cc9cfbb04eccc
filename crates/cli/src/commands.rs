// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command implementations.
//!
//! Each command takes already-loaded inputs and returns the JSON document
//! printed on stdout, so commands are testable without touching files.

use crate::error::CliError;
use formflow::{CheckMode, Navigator, Position, check_response};
use formflow_api::{CatalogImport, InMemoryResponseRepository, import_catalog, run_report};
use formflow_domain::{
    CatalogEntity, FormSchema, Report, Response, ResponseIssue, ResponseValues, SectionStep,
    section_steps, validate_for_publish, validate_schema,
};
use serde::de::DeserializeOwned;
use serde_json::{Value as Json, json};
use std::path::Path;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Reads a whole text file.
pub fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content: String = read_text(path)?;
    let parsed: T = serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), "Loaded input file");
    Ok(parsed)
}

/// Validates a schema, optionally with the stricter publish checks.
pub fn validate(schema: &FormSchema, publish: bool) -> Result<Json, CliError> {
    if publish {
        validate_for_publish(schema)?;
    } else {
        validate_schema(schema)?;
    }

    let steps: Vec<SectionStep<'_>> = section_steps(schema);
    info!(form_id = %schema.id, publish, "Schema is valid");

    Ok(json!({
        "valid": true,
        "form_id": schema.id,
        "status": schema.status.as_str(),
        "field_count": schema.flatten_fields().count(),
        "steps": steps
            .iter()
            .map(|step| json!({
                "title": step.title,
                "fields": step.fields.iter().map(|field| field.id.as_str()).collect::<Vec<&str>>(),
            }))
            .collect::<Vec<Json>>(),
    }))
}

fn render_position(navigator: &Navigator<'_>, position: Position) -> Json {
    match (position.index(), navigator.field_at(position)) {
        (Some(index), Some(field)) => json!({ "position": index, "field_id": field.id }),
        _ => json!({ "complete": true }),
    }
}

/// Computes the next position and the visited path for a set of answers.
///
/// Without `from`, the next position is the first field of the form.
pub fn navigate(
    schema: &FormSchema,
    values: &ResponseValues,
    from: Option<&str>,
) -> Result<Json, CliError> {
    validate_schema(schema)?;
    let navigator: Navigator<'_> = Navigator::new(schema);

    let next: Position = match from {
        Some(field_id) => {
            let current: Position =
                navigator
                    .position_of(field_id)
                    .ok_or_else(|| CliError::UnknownField {
                        field_id: field_id.to_string(),
                    })?;
            navigator.next(current, values)
        }
        None => navigator.start(),
    };

    let path: Vec<&str> = navigator
        .path(values)
        .into_iter()
        .map(|field| field.id.as_str())
        .collect();

    Ok(json!({
        "next": render_position(&navigator, next),
        "path": path,
    }))
}

/// Checks answers against a schema.
///
/// # Returns
///
/// The rendered report and the number of issues found.
pub fn check(
    schema: &FormSchema,
    values: &ResponseValues,
    submit: bool,
) -> Result<(Json, usize), CliError> {
    validate_schema(schema)?;
    let mode: CheckMode = if submit {
        CheckMode::Submit
    } else {
        CheckMode::Draft
    };

    let issues: Vec<ResponseIssue> = check_response(schema, values, mode);
    let rendered: Json = json!({
        "valid": issues.is_empty(),
        "issues": issues.iter().map(ToString::to_string).collect::<Vec<String>>(),
    });
    Ok((rendered, issues.len()))
}

/// Runs every visualization of a report over a response collection.
pub fn report(report: &Report, responses: Vec<Response>) -> Result<Json, CliError> {
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::new(responses);
    Ok(serde_json::to_value(run_report(report, &repository))?)
}

/// Imports a catalog CSV into an existing collection.
pub fn import(
    csv_content: &str,
    academic_year_id: &str,
    existing: &[CatalogEntity],
    now: OffsetDateTime,
) -> Result<Json, CliError> {
    let imported: CatalogImport = import_catalog(csv_content, academic_year_id, existing, now)?;
    Ok(serde_json::to_value(imported)?)
}
