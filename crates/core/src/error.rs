// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use formflow_domain::{DomainError, SchemaError, ValueKind};

/// Errors that can occur while evaluating schemas and responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The schema failed structural validation.
    InvalidSchema(SchemaError),
    /// An operator was applied to a value kind it cannot handle.
    ///
    /// Never fatal: filters treat it as a non-match and aggregation skips
    /// the contribution.
    TypeMismatch {
        /// The field whose value was evaluated.
        field_id: String,
        /// The operator or accumulation that was attempted.
        operator: &'static str,
        /// The kind of the offending value.
        value_kind: ValueKind,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidSchema(err) => write!(f, "Invalid schema: {err}"),
            Self::TypeMismatch {
                field_id,
                operator,
                value_kind,
            } => {
                write!(
                    f,
                    "Type mismatch: '{operator}' cannot apply to {value_kind} value of field '{field_id}'"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<SchemaError> for CoreError {
    fn from(err: SchemaError) -> Self {
        Self::InvalidSchema(err)
    }
}
