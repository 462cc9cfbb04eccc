// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV import of catalog entities.
//!
//! The CSV carries a header row naming a `code` and a `name` column (case and
//! surrounding whitespace are ignored). Rows that cannot be used are reported
//! individually; they never abort the import.

use crate::error::ApiError;
use csv::StringRecord;
use formflow_domain::{CatalogEntity, CatalogMerge, CatalogRow, catalog_from_rows, merge_catalog};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};

/// Required CSV column headers (normalized).
const REQUIRED_HEADERS: &[&str] = &["code", "name"];

/// A CSV row that was left out of the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// Why the row was rejected.
    pub reason: String,
}

/// The usable rows of a catalog CSV.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCatalogCsv {
    /// Rows with a code, in file order.
    pub rows: Vec<CatalogRow>,
    /// Rows that could not be used.
    pub rejected: Vec<RejectedRow>,
}

/// The outcome of importing a catalog CSV into an existing collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogImport {
    /// The merged collection.
    pub entities: Vec<CatalogEntity>,
    /// Entries dropped while deduplicating by code.
    pub duplicates_removed: usize,
    /// CSV rows left out of the import.
    pub rejected: Vec<RejectedRow>,
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Locates the required columns.
fn header_positions(headers: &StringRecord) -> Result<(usize, usize), ApiError> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    let position = |name: &str| normalized.iter().position(|header| header == name);

    match (position(REQUIRED_HEADERS[0]), position(REQUIRED_HEADERS[1])) {
        (Some(code), Some(name)) => Ok((code, name)),
        _ => {
            let missing: Vec<&str> = REQUIRED_HEADERS
                .iter()
                .copied()
                .filter(|required| position(*required).is_none())
                .collect();
            Err(ApiError::InvalidCsvFormat {
                reason: format!("Missing required headers: {}", missing.join(", ")),
            })
        }
    }
}

/// Parses catalog rows from CSV text.
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the header row cannot be read or
/// lacks a required column.
pub fn parse_catalog_csv(csv_content: &str) -> Result<ParsedCatalogCsv, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();
    let (code_column, name_column) = header_positions(&headers)?;

    let mut parsed: ParsedCatalogCsv = ParsedCatalogCsv::default();
    for (idx, result) in reader.records().enumerate() {
        let row_number: usize = idx + 1;

        let record: StringRecord = match result {
            Ok(record) => record,
            Err(e) => {
                parsed.rejected.push(RejectedRow {
                    row_number,
                    reason: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let code: &str = record.get(code_column).unwrap_or_default();
        if code.is_empty() {
            parsed.rejected.push(RejectedRow {
                row_number,
                reason: String::from("code: required field is missing or empty"),
            });
            continue;
        }

        parsed.rows.push(CatalogRow {
            code: code.to_string(),
            name: record.get(name_column).unwrap_or_default().to_string(),
        });
    }

    Ok(parsed)
}

/// Imports a catalog CSV and merges it into an existing collection.
///
/// # Arguments
///
/// * `csv_content` - The CSV text
/// * `academic_year_id` - The year the imported entities belong to
/// * `existing` - The current collection
/// * `now` - Creation and update time of the imported entities
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the CSV header is unusable.
pub fn import_catalog(
    csv_content: &str,
    academic_year_id: &str,
    existing: &[CatalogEntity],
    now: OffsetDateTime,
) -> Result<CatalogImport, ApiError> {
    let parsed: ParsedCatalogCsv = parse_catalog_csv(csv_content)?;
    for rejected in &parsed.rejected {
        warn!(
            row_number = rejected.row_number,
            reason = %rejected.reason,
            "Skipping catalog CSV row"
        );
    }

    let imported: Vec<CatalogEntity> = catalog_from_rows(&parsed.rows, academic_year_id, now);
    let merge: CatalogMerge = merge_catalog(existing, &imported);

    info!(
        academic_year_id,
        imported = imported.len(),
        rejected = parsed.rejected.len(),
        entities = merge.entities.len(),
        duplicates_removed = merge.duplicates_removed,
        "Imported catalog"
    );

    Ok(CatalogImport {
        entities: merge.entities,
        duplicates_removed: merge.duplicates_removed,
        rejected: parsed.rejected,
    })
}
