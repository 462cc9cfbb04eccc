// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Responses and their Draft → Submitted lifecycle.
//!
//! Lifecycle operations return new values; a response is never mutated in
//! place by this crate.

use crate::error::DomainError;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Answers keyed by field id.
pub type ResponseValues = HashMap<String, Value>;

/// Lifecycle state of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// Saved but not yet submitted; may still change.
    #[default]
    Draft,
    /// Submitted; immutable.
    Submitted,
}

impl ResponseStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
        }
    }
}

/// One user's answers to one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The response identifier.
    pub id: String,
    /// The form answered.
    pub form_id: String,
    /// The responding user.
    pub user_id: String,
    /// Answers keyed by field id.
    #[serde(default)]
    pub values: ResponseValues,
    /// Lifecycle state.
    #[serde(default)]
    pub status: ResponseStatus,
    /// When the response was first saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the response was last saved.
    #[serde(with = "time::serde::rfc3339")]
    pub last_modified_at: OffsetDateTime,
    /// When the response was submitted. Present iff Submitted.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub submitted_at: Option<OffsetDateTime>,
}

impl Response {
    /// Creates an empty Draft response.
    ///
    /// # Arguments
    ///
    /// * `id` - The response identifier
    /// * `form_id` - The form being answered
    /// * `user_id` - The responding user
    /// * `now` - The creation time
    #[must_use]
    pub fn new_draft(id: &str, form_id: &str, user_id: &str, now: OffsetDateTime) -> Self {
        Self {
            id: id.to_string(),
            form_id: form_id.to_string(),
            user_id: user_id.to_string(),
            values: HashMap::new(),
            status: ResponseStatus::Draft,
            created_at: now,
            last_modified_at: now,
            submitted_at: None,
        }
    }

    /// Returns the value recorded for a field, or Absent.
    #[must_use]
    pub fn value(&self, field_id: &str) -> &Value {
        static ABSENT: Value = Value::Absent;
        self.values.get(field_id).unwrap_or(&ABSENT)
    }

    /// Returns true once the response has been submitted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self.status, ResponseStatus::Submitted)
    }

    /// Returns a copy of this Draft with its answers replaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ResponseAlreadySubmitted` if the response has
    /// been submitted.
    pub fn with_values(
        &self,
        values: ResponseValues,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        self.ensure_draft()?;
        Ok(Self {
            values,
            last_modified_at: now,
            ..self.clone()
        })
    }

    /// Returns a Submitted copy of this Draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ResponseAlreadySubmitted` if the response has
    /// already been submitted.
    pub fn submitted(&self, now: OffsetDateTime) -> Result<Self, DomainError> {
        self.ensure_draft()?;
        Ok(Self {
            status: ResponseStatus::Submitted,
            last_modified_at: now,
            submitted_at: Some(now),
            ..self.clone()
        })
    }

    fn ensure_draft(&self) -> Result<(), DomainError> {
        if self.is_submitted() {
            return Err(DomainError::ResponseAlreadySubmitted {
                response_id: self.id.clone(),
            });
        }
        Ok(())
    }
}
