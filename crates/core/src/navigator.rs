// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conditional navigation through a form.
//!
//! Navigation is a state machine over positions in the flattened field
//! sequence. Advancing from a field evaluates that field's conditional rules
//! in declaration order; the first match decides the jump, otherwise the next
//! field follows. Going back never evaluates rules.
//!
//! ## Invariants
//!
//! - Navigation is a pure function of `(schema, values)`
//! - Jumps only move forward, so every walk terminates
//! - A dangling or backward jump target falls through to the next field

use crate::error::CoreError;
use crate::filter::contains;
use formflow_domain::{
    ConditionalRule, Field, FormSchema, JumpTarget, ResponseValues, RuleOperator, Value,
    validate_schema,
};
use std::collections::HashMap;
use tracing::warn;

/// A place in the flattened field sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// The field at this index of the flattened sequence.
    At(usize),
    /// Past the last field: the form is complete.
    Complete,
}

impl Position {
    /// Returns true for the terminal position.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Returns the field index, if not complete.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::At(index) => Some(*index),
            Self::Complete => None,
        }
    }
}

/// Computes navigation decisions for one schema.
///
/// Holds the flattened field sequence and an id → position index. The schema
/// is expected to have passed validation.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    fields: Vec<&'a Field>,
    positions: HashMap<&'a str, usize>,
}

impl<'a> Navigator<'a> {
    /// Builds a navigator over a schema's flattened fields.
    #[must_use]
    pub fn new(schema: &'a FormSchema) -> Self {
        let fields: Vec<&'a Field> = schema.flatten_fields().collect();
        let mut positions: HashMap<&'a str, usize> = HashMap::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            // First occurrence wins should ids ever collide.
            positions.entry(field.id.as_str()).or_insert(index);
        }
        Self { fields, positions }
    }

    /// Validates a schema, then builds a navigator over it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchema` if the schema fails structural
    /// validation.
    pub fn validated(schema: &'a FormSchema) -> Result<Self, CoreError> {
        validate_schema(schema)?;
        Ok(Self::new(schema))
    }

    /// Returns the number of navigable fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the first position, or Complete for an empty schema.
    #[must_use]
    pub fn start(&self) -> Position {
        self.position_at(0)
    }

    /// Returns the field at a position.
    #[must_use]
    pub fn field_at(&self, position: Position) -> Option<&'a Field> {
        position
            .index()
            .and_then(|index| self.fields.get(index).copied())
    }

    /// Returns the position of a field by id.
    #[must_use]
    pub fn position_of(&self, field_id: &str) -> Option<Position> {
        self.positions.get(field_id).map(|&index| Position::At(index))
    }

    /// Computes the position after answering the field at `current`.
    ///
    /// # Arguments
    ///
    /// * `current` - The position just answered
    /// * `values` - The accumulated answers
    ///
    /// # Returns
    ///
    /// The jump target of the first matching rule on the current field, the
    /// following position when no rule matches, or Complete past the end.
    /// Complete stays Complete.
    #[must_use]
    pub fn next(&self, current: Position, values: &ResponseValues) -> Position {
        let Some(index) = current.index() else {
            return Position::Complete;
        };
        let Some(field) = self.fields.get(index) else {
            return Position::Complete;
        };

        let Some(rule) = field
            .conditional_rules
            .iter()
            .find(|rule| rule_holds(rule, values))
        else {
            return self.position_at(index + 1);
        };

        match &rule.target {
            JumpTarget::EndOfForm => Position::Complete,
            JumpTarget::Field(target_field_id) => match self.positions.get(target_field_id.as_str())
            {
                Some(&target) if target > index => Position::At(target),
                Some(_) => {
                    warn!(
                        field_id = %field.id,
                        target_field_id = %target_field_id,
                        "Ignoring backward conditional jump"
                    );
                    self.position_at(index + 1)
                }
                None => {
                    warn!(
                        field_id = %field.id,
                        target_field_id = %target_field_id,
                        "Ignoring conditional jump to unknown field"
                    );
                    self.position_at(index + 1)
                }
            },
        }
    }

    /// Walks the form from the start with the given answers.
    ///
    /// Unanswered fields evaluate their rules against Absent. The result is
    /// every field a respondent would be shown, in order, ignoring fields
    /// skipped by conditional jumps.
    #[must_use]
    pub fn path(&self, values: &ResponseValues) -> Vec<&'a Field> {
        let mut visited: Vec<&'a Field> = Vec::new();
        let mut position: Position = self.start();

        while let Some(field) = self.field_at(position) {
            visited.push(field);
            position = self.next(position, values);
        }

        visited
    }

    fn position_at(&self, index: usize) -> Position {
        if index < self.fields.len() {
            Position::At(index)
        } else {
            Position::Complete
        }
    }
}

/// Evaluates a rule's condition against the accumulated answers.
fn rule_holds(rule: &ConditionalRule, values: &ResponseValues) -> bool {
    static ABSENT: Value = Value::Absent;
    let value: &Value = values.get(&rule.source_field_id).unwrap_or(&ABSENT);
    let operand: Value = rule.value.to_value();

    match rule.operator {
        RuleOperator::Equals => value.loosely_equals(&operand),
        RuleOperator::NotEquals => !value.loosely_equals(&operand),
        RuleOperator::Contains => contains(value, &operand) == Some(true),
        RuleOperator::NotContains => contains(value, &operand) == Some(false),
    }
}

/// A respondent's place in a form plus the trail that led there.
///
/// Advancing records the departed position so that going back retraces the
/// exact path taken, without re-evaluating any rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    history: Vec<usize>,
}

impl Cursor {
    /// Places a cursor at the start of the form.
    #[must_use]
    pub fn start(navigator: &Navigator<'_>) -> Self {
        Self {
            position: navigator.start(),
            history: Vec::new(),
        }
    }

    /// Returns the current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns true if there is a previous position to return to.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Returns the cursor after answering the current field.
    ///
    /// At Complete, returns an identical cursor.
    #[must_use]
    pub fn advance(&self, navigator: &Navigator<'_>, values: &ResponseValues) -> Self {
        let Some(index) = self.position.index() else {
            return self.clone();
        };

        let mut history: Vec<usize> = self.history.clone();
        history.push(index);
        Self {
            position: navigator.next(self.position, values),
            history,
        }
    }

    /// Returns the cursor at the previously visited position.
    ///
    /// At the start, returns an identical cursor.
    #[must_use]
    pub fn back(&self) -> Self {
        let mut history: Vec<usize> = self.history.clone();
        match history.pop() {
            Some(index) => Self {
                position: Position::At(index),
                history,
            },
            None => self.clone(),
        }
    }
}
