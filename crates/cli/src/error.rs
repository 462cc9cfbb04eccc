// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the command-line front end.

use formflow_api::ApiError;
use formflow_domain::SchemaError;
use thiserror::Error;

/// Everything that can make a command fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// The file path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// An input file is not valid JSON for the expected shape.
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        /// The file path.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
    /// Command output could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
    /// The schema failed validation.
    #[error("Schema is invalid: {0}")]
    InvalidSchema(#[from] SchemaError),
    /// A field id given on the command line is not in the schema.
    #[error("Unknown field '{field_id}'")]
    UnknownField {
        /// The field id.
        field_id: String,
    },
    /// The checked answers have issues.
    #[error("Response has {count} issue(s)")]
    CheckFailed {
        /// The number of issues found.
        count: usize,
    },
    /// An API operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
