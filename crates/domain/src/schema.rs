// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Form schema model.
//!
//! A schema is an ordered tree of fields. Top-level fields may be standalone
//! inputs or Sections; Sections nest input fields exactly one level deep.

use crate::error::DomainError;
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};

/// The kind of input a field collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// Drop-down single choice.
    Select,
    /// Radio-button single choice.
    Radio,
    /// Multiple choice.
    Checkbox,
    /// A calendar date, stored as text.
    Date,
    /// A numeric input.
    Number,
    /// File upload.
    File,
    /// A grouping of nested fields presented as one step.
    Section,
}

impl FieldKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "text_area",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Number => "number",
            Self::File => "file",
            Self::Section => "section",
        }
    }

    /// Returns true for kinds that pick from a declared option list.
    #[must_use]
    pub const fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Returns true if a value of the given kind may be stored for this field.
    ///
    /// Absent is always accepted. Sections never hold a value.
    #[must_use]
    pub const fn accepts(&self, kind: ValueKind) -> bool {
        if matches!(kind, ValueKind::Absent) {
            return true;
        }
        match self {
            Self::Text | Self::TextArea | Self::Date | Self::Select | Self::Radio => {
                matches!(kind, ValueKind::Text)
            }
            Self::Checkbox => matches!(kind, ValueKind::StringList),
            Self::Number => matches!(kind, ValueKind::Number),
            Self::File => matches!(kind, ValueKind::FileRefList),
            Self::Section => false,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Upload restrictions for a File field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConstraints {
    /// Accepted MIME types or extensions (e.g. `application/pdf`, `.docx`).
    /// Empty means any type.
    #[serde(default)]
    pub allowed_types: Vec<String>,
    /// Maximum size of a single file in bytes.
    #[serde(default)]
    pub max_size_bytes: Option<u64>,
    /// Whether more than one file may be attached.
    #[serde(default)]
    pub multiple: bool,
}

/// Comparison operators available to conditional rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    /// Value equals the comparison value.
    Equals,
    /// Value does not equal the comparison value.
    NotEquals,
    /// Value contains the comparison value.
    Contains,
    /// Value does not contain the comparison value.
    NotContains,
}

impl RuleOperator {
    /// Returns the string representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
        }
    }
}

/// The comparison operand of a conditional rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A single string.
    Single(String),
    /// A list of strings.
    Many(Vec<String>),
}

impl RuleValue {
    /// Converts the operand into a [`Value`] for kind-aware comparison.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(text) => Value::Text(text.clone()),
            Self::Many(items) => Value::StringList(items.clone()),
        }
    }
}

/// Where navigation goes when a rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpTarget {
    /// Jump to the field with this id.
    Field(String),
    /// Finish the form.
    EndOfForm,
}

/// A conditional branching rule attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// The field whose value is tested.
    pub source_field_id: String,
    /// The comparison operator.
    pub operator: RuleOperator,
    /// The comparison operand.
    pub value: RuleValue,
    /// Where navigation jumps when the condition holds.
    pub target: JumpTarget,
}

impl ConditionalRule {
    /// Creates a rule that jumps to a field.
    #[must_use]
    pub fn jump_to_field(
        source_field_id: &str,
        operator: RuleOperator,
        value: RuleValue,
        target_field_id: &str,
    ) -> Self {
        Self {
            source_field_id: source_field_id.to_string(),
            operator,
            value,
            target: JumpTarget::Field(target_field_id.to_string()),
        }
    }

    /// Creates a rule that finishes the form.
    #[must_use]
    pub fn jump_to_end(source_field_id: &str, operator: RuleOperator, value: RuleValue) -> Self {
        Self {
            source_field_id: source_field_id.to_string(),
            operator,
            value,
            target: JumpTarget::EndOfForm,
        }
    }
}

/// One question, or a Section grouping questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Unique identifier across the whole schema tree.
    pub id: String,
    /// The input kind.
    pub kind: FieldKind,
    /// The question text, or the Section title.
    pub label: String,
    /// Whether an answer is required on submission.
    #[serde(default)]
    pub required: bool,
    /// Choices for Select, Radio and Checkbox fields.
    #[serde(default)]
    pub options: Vec<String>,
    /// Upload restrictions for File fields.
    #[serde(default)]
    pub file_constraints: Option<FileConstraints>,
    /// Help text shown with the field.
    #[serde(default)]
    pub description: Option<String>,
    /// Input placeholder text.
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Nested fields; only Sections may have any.
    #[serde(default)]
    pub fields: Vec<Self>,
    /// Branching rules evaluated after this field is answered.
    #[serde(default)]
    pub conditional_rules: Vec<ConditionalRule>,
}

impl Field {
    /// Creates a field with no options, children or rules.
    #[must_use]
    pub fn new(id: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            required: false,
            options: Vec::new(),
            file_constraints: None,
            description: None,
            placeholder: None,
            fields: Vec::new(),
            conditional_rules: Vec::new(),
        }
    }

    /// Creates a Section holding the given fields.
    #[must_use]
    pub fn section(id: &str, label: &str, fields: Vec<Self>) -> Self {
        Self {
            fields,
            ..Self::new(id, FieldKind::Section, label)
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the option list.
    #[must_use]
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| (*o).to_string()).collect();
        self
    }

    /// Sets the upload constraints.
    #[must_use]
    pub fn with_file_constraints(mut self, constraints: FileConstraints) -> Self {
        self.file_constraints = Some(constraints);
        self
    }

    /// Appends a conditional rule.
    #[must_use]
    pub fn with_rule(mut self, rule: ConditionalRule) -> Self {
        self.conditional_rules.push(rule);
        self
    }

    /// Returns true if this field is a Section.
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self.kind, FieldKind::Section)
    }
}

/// Publication state of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    /// Being edited, not visible to respondents.
    #[default]
    Draft,
    /// Open to respondents.
    Published,
    /// No longer open.
    Closed,
}

impl FormStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Closed => "closed",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Published
    /// - Published → Closed
    /// - Published → Draft (unpublish)
    /// - Closed → Published (reopen)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Published)
                | (Self::Published, Self::Closed | Self::Draft)
                | (Self::Closed, Self::Published)
        )
    }
}

/// A complete form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// The form identifier.
    pub id: String,
    /// The form title.
    pub title: String,
    /// Introductory text.
    #[serde(default)]
    pub description: String,
    /// Top-level fields in document order.
    pub fields: Vec<Field>,
    /// Publication state.
    #[serde(default)]
    pub status: FormStatus,
    /// Whether a user may submit more than one response.
    #[serde(default)]
    pub allow_multiple_responses_per_user: bool,
    /// Administrative switch to pause a published form.
    #[serde(default = "default_accepting_responses")]
    pub accepting_responses: bool,
}

const fn default_accepting_responses() -> bool {
    true
}

impl FormSchema {
    /// Creates a draft schema.
    #[must_use]
    pub fn new(id: &str, title: &str, fields: Vec<Field>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            fields,
            status: FormStatus::Draft,
            allow_multiple_responses_per_user: false,
            accepting_responses: true,
        }
    }

    /// Returns all fields in document order, with Section children inline
    /// immediately after their Section.
    ///
    /// Each call returns a fresh iterator, so the sequence can be restarted.
    #[must_use]
    pub fn flatten_fields(&self) -> FlattenedFields<'_> {
        FlattenedFields {
            top: &self.fields,
            top_index: 0,
            children: None,
        }
    }

    /// Looks up a field anywhere in the tree.
    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.flatten_fields().find(|field| field.id == field_id)
    }

    /// Returns true if respondents may currently answer this form.
    #[must_use]
    pub const fn accepts_responses(&self) -> bool {
        matches!(self.status, FormStatus::Published) && self.accepting_responses
    }

    /// Returns a copy of this schema in the target status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the change is not
    /// permitted by [`FormStatus::can_transition_to`].
    pub fn with_status(&self, target: FormStatus) -> Result<Self, DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        Ok(Self {
            status: target,
            ..self.clone()
        })
    }
}

/// Lazy document-order traversal of a schema's fields.
///
/// Produced by [`FormSchema::flatten_fields`].
#[derive(Debug, Clone)]
pub struct FlattenedFields<'a> {
    top: &'a [Field],
    top_index: usize,
    children: Option<std::slice::Iter<'a, Field>>,
}

impl<'a> Iterator for FlattenedFields<'a> {
    type Item = &'a Field;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(children) = self.children.as_mut() {
            if let Some(child) = children.next() {
                return Some(child);
            }
            self.children = None;
        }

        let field: &'a Field = self.top.get(self.top_index)?;
        self.top_index += 1;
        if field.is_section() {
            self.children = Some(field.fields.iter());
        }
        Some(field)
    }
}

/// One presentation step: a titled group of fields shown together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStep<'a> {
    /// The step title.
    pub title: String,
    /// The Section this step came from, if any.
    pub section_id: Option<&'a str>,
    /// The fields presented in this step.
    pub fields: Vec<&'a Field>,
}

/// Title of the step holding standalone fields before the first Section.
pub const GENERAL_STEP_TITLE: &str = "General";

/// Groups top-level fields into presentation steps.
///
/// Each Section opens a step holding its children. Standalone fields before
/// the first Section form a leading "General" step; standalone fields after a
/// Section join the preceding step.
#[must_use]
pub fn section_steps(schema: &FormSchema) -> Vec<SectionStep<'_>> {
    let mut steps: Vec<SectionStep<'_>> = Vec::new();

    for field in &schema.fields {
        if field.is_section() {
            steps.push(SectionStep {
                title: field.label.clone(),
                section_id: Some(field.id.as_str()),
                fields: field.fields.iter().collect(),
            });
            continue;
        }

        match steps.last_mut() {
            Some(step) => step.fields.push(field),
            None => steps.push(SectionStep {
                title: String::from(GENERAL_STEP_TITLE),
                section_id: None,
                fields: vec![field],
            }),
        }
    }

    steps
}
