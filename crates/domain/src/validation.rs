// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::SchemaError;
use crate::schema::{Field, FileConstraints, FormSchema, JumpTarget};
use crate::value::{FileRef, Value, ValueKind};
use std::collections::HashSet;

/// Validates the structural invariants of a form schema.
///
/// This function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `schema` - The schema to validate
///
/// # Returns
///
/// * `Ok(())` if the schema is well formed
/// * `Err(SchemaError)` describing the first violation in document order
///
/// # Errors
///
/// Returns an error if:
/// - Two fields anywhere in the tree share an id
/// - A non-Section field has nested fields, or a Section nests a Section
/// - A choice field (Select, Radio, Checkbox) has no options
/// - A conditional rule tests or jumps to a field that does not exist
pub fn validate_schema(schema: &FormSchema) -> Result<(), SchemaError> {
    // Rule: nesting is one level deep, Sections only
    for field in &schema.fields {
        validate_nesting(field)?;
    }

    // Rule: field ids are unique across the whole tree
    let mut seen: HashSet<&str> = HashSet::new();
    for field in schema.flatten_fields() {
        if !seen.insert(field.id.as_str()) {
            return Err(SchemaError::DuplicateFieldId {
                field_id: field.id.clone(),
            });
        }
    }

    for field in schema.flatten_fields() {
        // Rule: choice fields offer at least one option
        if field.kind.is_choice() && field.options.is_empty() {
            return Err(SchemaError::MissingOptions {
                field_id: field.id.clone(),
            });
        }

        // Rule: conditional rules reference existing fields
        for rule in &field.conditional_rules {
            if !seen.contains(rule.source_field_id.as_str()) {
                return Err(SchemaError::UnknownConditionalSource {
                    field_id: field.id.clone(),
                    source_field_id: rule.source_field_id.clone(),
                });
            }
            if let JumpTarget::Field(target_field_id) = &rule.target
                && !seen.contains(target_field_id.as_str())
            {
                return Err(SchemaError::DanglingConditionalTarget {
                    field_id: field.id.clone(),
                    target_field_id: target_field_id.clone(),
                });
            }
        }
    }

    Ok(())
}

fn validate_nesting(field: &Field) -> Result<(), SchemaError> {
    if !field.is_section() {
        if !field.fields.is_empty() {
            return Err(SchemaError::InvalidNesting {
                field_id: field.id.clone(),
                reason: "only sections may contain fields",
            });
        }
        return Ok(());
    }

    for child in &field.fields {
        if child.is_section() {
            return Err(SchemaError::InvalidNesting {
                field_id: child.id.clone(),
                reason: "sections cannot be nested inside sections",
            });
        }
        if !child.fields.is_empty() {
            return Err(SchemaError::InvalidNesting {
                field_id: child.id.clone(),
                reason: "only sections may contain fields",
            });
        }
    }

    Ok(())
}

/// Validates that a schema is ready to be published.
///
/// # Errors
///
/// Returns an error if:
/// - Any structural invariant checked by [`validate_schema`] fails
/// - The title is blank
/// - The form has no input fields (Sections alone do not count)
pub fn validate_for_publish(schema: &FormSchema) -> Result<(), SchemaError> {
    validate_schema(schema)?;

    if schema.title.trim().is_empty() {
        return Err(SchemaError::MissingTitle);
    }

    if !schema.flatten_fields().any(|field| !field.is_section()) {
        return Err(SchemaError::EmptyForm);
    }

    Ok(())
}

/// A problem with one answer in a response.
///
/// Issues are reported, never raised: a response with issues is still a
/// valid input to navigation and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseIssue {
    /// A value is recorded for a field the schema does not define.
    UnknownField {
        /// The unknown field id.
        field_id: String,
    },
    /// The value kind is not legal for the field kind.
    KindMismatch {
        /// The field.
        field_id: String,
        /// The kind of the recorded value.
        found: ValueKind,
    },
    /// A choice answer is not among the declared options.
    OptionNotAllowed {
        /// The field.
        field_id: String,
        /// The rejected choice.
        option: String,
    },
    /// An uploaded file type is not allowed.
    FileTypeNotAllowed {
        /// The field.
        field_id: String,
        /// The rejected file name.
        file_name: String,
    },
    /// An uploaded file exceeds the size limit.
    FileTooLarge {
        /// The field.
        field_id: String,
        /// The rejected file name.
        file_name: String,
        /// The configured limit in bytes.
        max_size_bytes: u64,
    },
    /// More than one file was attached to a single-file field.
    MultipleFilesNotAllowed {
        /// The field.
        field_id: String,
    },
    /// A required field has no answer.
    RequiredMissing {
        /// The field.
        field_id: String,
    },
}

impl std::fmt::Display for ResponseIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField { field_id } => write!(f, "Unknown field '{field_id}'"),
            Self::KindMismatch { field_id, found } => {
                write!(f, "Field '{field_id}' cannot hold a {found} value")
            }
            Self::OptionNotAllowed { field_id, option } => {
                write!(f, "Field '{field_id}' does not offer option '{option}'")
            }
            Self::FileTypeNotAllowed {
                field_id,
                file_name,
            } => write!(f, "File '{file_name}' has a type not allowed for '{field_id}'"),
            Self::FileTooLarge {
                field_id,
                file_name,
                max_size_bytes,
            } => write!(
                f,
                "File '{file_name}' for '{field_id}' exceeds {max_size_bytes} bytes"
            ),
            Self::MultipleFilesNotAllowed { field_id } => {
                write!(f, "Field '{field_id}' accepts a single file")
            }
            Self::RequiredMissing { field_id } => write!(f, "Field '{field_id}' is required"),
        }
    }
}

/// Checks one value against its field definition.
///
/// Covers value kind, option membership and upload constraints. The
/// required flag is not checked here since it depends on navigation.
///
/// # Arguments
///
/// * `field` - The field definition
/// * `value` - The recorded value
///
/// # Returns
///
/// Every issue found, in a stable order. Empty when the value conforms.
#[must_use]
pub fn check_value(field: &Field, value: &Value) -> Vec<ResponseIssue> {
    let mut issues: Vec<ResponseIssue> = Vec::new();

    if !field.kind.accepts(value.kind()) {
        issues.push(ResponseIssue::KindMismatch {
            field_id: field.id.clone(),
            found: value.kind(),
        });
        return issues;
    }

    if field.kind.is_choice() {
        let chosen: Vec<&String> = match value {
            Value::Text(text) if !text.is_empty() => vec![text],
            Value::StringList(items) => items.iter().collect(),
            _ => Vec::new(),
        };
        for option in chosen {
            if !field.options.contains(option) {
                issues.push(ResponseIssue::OptionNotAllowed {
                    field_id: field.id.clone(),
                    option: option.clone(),
                });
            }
        }
    }

    if let (Value::FileRefList(files), Some(constraints)) = (value, &field.file_constraints) {
        check_files(&field.id, files, constraints, &mut issues);
    }

    issues
}

fn check_files(
    field_id: &str,
    files: &[FileRef],
    constraints: &FileConstraints,
    issues: &mut Vec<ResponseIssue>,
) {
    if !constraints.multiple && files.len() > 1 {
        issues.push(ResponseIssue::MultipleFilesNotAllowed {
            field_id: field_id.to_string(),
        });
    }

    for file in files {
        if !file_type_allowed(file, &constraints.allowed_types) {
            issues.push(ResponseIssue::FileTypeNotAllowed {
                field_id: field_id.to_string(),
                file_name: file.name.clone(),
            });
        }
        if let Some(max_size_bytes) = constraints.max_size_bytes
            && file.size_bytes > max_size_bytes
        {
            issues.push(ResponseIssue::FileTooLarge {
                field_id: field_id.to_string(),
                file_name: file.name.clone(),
                max_size_bytes,
            });
        }
    }
}

/// Matches a file against allowed MIME types (`image/png`), MIME families
/// (`image/*`) or extensions (`.pdf`). An empty list allows everything.
fn file_type_allowed(file: &FileRef, allowed_types: &[String]) -> bool {
    if allowed_types.is_empty() {
        return true;
    }

    let name: String = file.name.to_lowercase();
    let mime: String = file.mime_type.to_lowercase();
    allowed_types.iter().any(|allowed| {
        let allowed: String = allowed.trim().to_lowercase();
        if allowed.starts_with('.') {
            name.ends_with(&allowed)
        } else if let Some(family) = allowed.strip_suffix("/*") {
            mime.split('/').next() == Some(family)
        } else {
            mime == allowed
        }
    })
}
