// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Saving respondent answers.

use crate::error::ApiError;
use crate::repository::ResponseRepository;
use formflow::{CheckMode, CoreError, check_response};
use formflow_domain::{
    DomainError, FormSchema, Response, ResponseIssue, ResponseValues, validate_schema,
};
use time::OffsetDateTime;
use tracing::info;

/// What the respondent is doing with their answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveIntent {
    /// Keep working later; incomplete answers are fine.
    Draft,
    /// Finish the response; required answers are enforced.
    Submit,
}

impl SaveIntent {
    const fn check_mode(self) -> CheckMode {
        match self {
            Self::Draft => CheckMode::Draft,
            Self::Submit => CheckMode::Submit,
        }
    }
}

/// Saves a user's answers to a form.
///
/// This function performs no I/O of its own. It decides which response the
/// answers belong to, checks them, and returns the resulting response for
/// the caller to persist.
///
/// # Arguments
///
/// * `repository` - Where existing responses are looked up
/// * `schema` - The form being answered
/// * `user_id` - The respondent
/// * `response_id` - The response being saved, or the id of a new one
/// * `values` - The complete set of answers
/// * `intent` - Save as draft or submit
/// * `now` - The save time
///
/// # Returns
///
/// The new state of the response. A stored Draft under `response_id` is
/// updated in place. Otherwise, when the form allows a single response per
/// user and the user has a Draft, that Draft is updated in place of a new one.
///
/// # Errors
///
/// Returns an error if:
/// - The form is not accepting responses
/// - The schema is structurally invalid
/// - The user already submitted the form's only allowed response
/// - The response under `response_id` is already submitted
/// - The response under `response_id` belongs to another user or form
/// - The answers do not conform to the schema
pub fn save_response<R: ResponseRepository>(
    repository: &R,
    schema: &FormSchema,
    user_id: &str,
    response_id: &str,
    values: ResponseValues,
    intent: SaveIntent,
    now: OffsetDateTime,
) -> Result<Response, ApiError> {
    if !schema.accepts_responses() {
        return Err(ApiError::FormNotAccepting {
            form_id: schema.id.clone(),
        });
    }
    validate_schema(schema).map_err(CoreError::from)?;

    let existing: Option<Response> = match repository.response_by_id(response_id) {
        Some(stored) if stored.form_id != schema.id || stored.user_id != user_id => {
            return Err(ApiError::ResponseMismatch {
                response_id: response_id.to_string(),
            });
        }
        Some(stored) => Some(stored),
        None if schema.allow_multiple_responses_per_user => None,
        None => repository.response_by_user_and_form(user_id, &schema.id),
    };

    let base: Response = match existing {
        Some(response) if response.is_submitted() => {
            if schema.allow_multiple_responses_per_user {
                return Err(DomainError::ResponseAlreadySubmitted {
                    response_id: response.id,
                }
                .into());
            }
            return Err(ApiError::DuplicateResponse {
                user_id: user_id.to_string(),
                form_id: schema.id.clone(),
            });
        }
        Some(draft) => draft,
        None => Response::new_draft(response_id, &schema.id, user_id, now),
    };

    let issues: Vec<ResponseIssue> = check_response(schema, &values, intent.check_mode());
    if !issues.is_empty() {
        return Err(ApiError::InvalidResponse { issues });
    }

    let updated: Response = base.with_values(values, now)?;
    let saved: Response = match intent {
        SaveIntent::Draft => updated,
        SaveIntent::Submit => updated.submitted(now)?,
    };

    info!(
        response_id = %saved.id,
        form_id = %saved.form_id,
        user_id = %saved.user_id,
        status = saved.status.as_str(),
        "Saved response"
    );

    Ok(saved)
}
