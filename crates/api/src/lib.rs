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
    clippy::all
)]

//! Service boundary for formflow.
//!
//! Wraps the pure evaluation engine with the operations an outer layer
//! calls: saving responses, executing reports and importing catalogs. The
//! response store is reached only through [`ResponseRepository`].

mod catalog_import;
mod error;
mod reporting;
mod repository;
mod responses;

#[cfg(test)]
mod tests;

pub use catalog_import::{
    CatalogImport, ParsedCatalogCsv, RejectedRow, import_catalog, parse_catalog_csv,
};
pub use error::ApiError;
pub use reporting::run_report;
pub use repository::{InMemoryResponseRepository, ResponseRepository};
pub use responses::{SaveIntent, save_response};
