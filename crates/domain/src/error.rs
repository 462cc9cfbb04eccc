// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::FormStatus;

/// Errors raised when a form schema violates its structural invariants.
///
/// These surface at authoring time only; navigation and reporting assume a
/// schema that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two fields in the tree share an id.
    DuplicateFieldId {
        /// The repeated id.
        field_id: String,
    },
    /// A conditional rule jumps to a field that does not exist.
    DanglingConditionalTarget {
        /// The field the rule is attached to.
        field_id: String,
        /// The missing target.
        target_field_id: String,
    },
    /// A conditional rule tests a field that does not exist.
    UnknownConditionalSource {
        /// The field the rule is attached to.
        field_id: String,
        /// The missing source.
        source_field_id: String,
    },
    /// A field is nested where nesting is not allowed.
    InvalidNesting {
        /// The offending field.
        field_id: String,
        /// Why the nesting is invalid.
        reason: &'static str,
    },
    /// A choice field declares no options.
    MissingOptions {
        /// The offending field.
        field_id: String,
    },
    /// The form has no title.
    MissingTitle,
    /// The form has no input fields.
    EmptyForm,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFieldId { field_id } => {
                write!(f, "Field id '{field_id}' is used more than once")
            }
            Self::DanglingConditionalTarget {
                field_id,
                target_field_id,
            } => {
                write!(
                    f,
                    "Conditional rule on field '{field_id}' jumps to unknown field '{target_field_id}'"
                )
            }
            Self::UnknownConditionalSource {
                field_id,
                source_field_id,
            } => {
                write!(
                    f,
                    "Conditional rule on field '{field_id}' tests unknown field '{source_field_id}'"
                )
            }
            Self::InvalidNesting { field_id, reason } => {
                write!(f, "Invalid nesting at field '{field_id}': {reason}")
            }
            Self::MissingOptions { field_id } => {
                write!(f, "Choice field '{field_id}' has no options")
            }
            Self::MissingTitle => write!(f, "Form title cannot be empty"),
            Self::EmptyForm => write!(f, "Form has no input fields"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors raised by lifecycle rules on forms and responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The response was already submitted and can no longer change.
    ResponseAlreadySubmitted {
        /// The response identifier.
        response_id: String,
    },
    /// A form status change is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: FormStatus,
        /// The requested status.
        to: FormStatus,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResponseAlreadySubmitted { response_id } => {
                write!(f, "Response '{response_id}' has already been submitted")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(
                    f,
                    "Cannot change form status from {} to {}",
                    from.as_str(),
                    to.as_str()
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
