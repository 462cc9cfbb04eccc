// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use formflow::CoreError;
use formflow_domain::{DomainError, ResponseIssue};
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The form is not published or has stopped accepting responses.
    #[error("Form '{form_id}' is not accepting responses")]
    FormNotAccepting {
        /// The form.
        form_id: String,
    },
    /// The user already submitted the only response the form allows.
    #[error("User '{user_id}' has already submitted a response to form '{form_id}'")]
    DuplicateResponse {
        /// The respondent.
        user_id: String,
        /// The form.
        form_id: String,
    },
    /// The response id is already used by another user or form.
    #[error("Response '{response_id}' belongs to a different user or form")]
    ResponseMismatch {
        /// The response identifier.
        response_id: String,
    },
    /// The answers do not conform to the schema.
    #[error("Response has {} issue(s): {}", .issues.len(), join_issues(.issues))]
    InvalidResponse {
        /// Every issue found.
        issues: Vec<ResponseIssue>,
    },
    /// The CSV input could not be read.
    #[error("Invalid CSV format: {reason}")]
    InvalidCsvFormat {
        /// What was wrong with the input.
        reason: String,
    },
    /// A core evaluation error.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// A domain rule was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

fn join_issues(issues: &[ResponseIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("; ")
}
