// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod catalog;
mod error;
mod report;
mod response;
mod schema;
mod validation;
mod value;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogEntity, CatalogMerge, CatalogRow, catalog_from_rows, merge_catalog};
pub use error::{DomainError, SchemaError};
pub use report::{
    ChartKind, FilterOperand, FilterOperator, Report, ReportFilter, ReportVisualization,
    SortDirection, SortSpec,
};
pub use response::{Response, ResponseStatus, ResponseValues};
pub use schema::{
    ConditionalRule, Field, FieldKind, FileConstraints, FlattenedFields, FormSchema, FormStatus,
    GENERAL_STEP_TITLE, JumpTarget, RuleOperator, RuleValue, SectionStep, section_steps,
};
pub use validation::{ResponseIssue, check_value, validate_for_publish, validate_schema};
pub use value::{FileRef, Value, ValueKind};
