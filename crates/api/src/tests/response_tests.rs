// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for saving responses.

use formflow::CoreError;
use formflow_domain::{
    ConditionalRule, DomainError, Field, FieldKind, FormSchema, FormStatus, Response,
    ResponseIssue, ResponseStatus, RuleOperator, RuleValue, SchemaError, Value,
};

use crate::{ApiError, InMemoryResponseRepository, SaveIntent, save_response};

use super::helpers::{
    create_later_time, create_published_schema, create_test_response, create_test_time,
    create_test_values,
};

#[test]
fn test_save_draft_creates_new_response() {
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::default();
    let schema: FormSchema = create_published_schema();

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[("staff", Value::Number(4.0))]),
        SaveIntent::Draft,
        create_test_time(),
    );

    let response: Response = result.unwrap();
    assert_eq!(response.id, "resp-1");
    assert_eq!(response.form_id, "form-1");
    assert_eq!(response.status, ResponseStatus::Draft);
    assert_eq!(response.submitted_at, None);
    assert_eq!(response.value("staff"), &Value::Number(4.0));
}

#[test]
fn test_submit_sets_submitted_at() {
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::default();
    let schema: FormSchema = create_published_schema();

    let response: Response = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[("region", Value::text("N"))]),
        SaveIntent::Submit,
        create_test_time(),
    )
    .unwrap();

    assert!(response.is_submitted());
    assert_eq!(response.submitted_at, Some(create_test_time()));
}

#[test]
fn test_submit_requires_required_fields() {
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::default();
    let schema: FormSchema = create_published_schema();

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[("staff", Value::Number(4.0))]),
        SaveIntent::Submit,
        create_test_time(),
    );

    assert_eq!(
        result,
        Err(ApiError::InvalidResponse {
            issues: vec![ResponseIssue::RequiredMissing {
                field_id: String::from("region"),
            }],
        })
    );
}

#[test]
fn test_draft_still_rejects_nonconforming_values() {
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::default();
    let schema: FormSchema = create_published_schema();

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[("region", Value::text("West"))]),
        SaveIntent::Draft,
        create_test_time(),
    );

    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[test]
fn test_unpublished_form_rejects_responses() {
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::default();
    let schema: FormSchema = FormSchema::new("form-draft", "Draft form", Vec::new());

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[]),
        SaveIntent::Draft,
        create_test_time(),
    );

    assert!(matches!(
        result,
        Err(ApiError::FormNotAccepting { form_id }) if form_id == "form-draft"
    ));
}

#[test]
fn test_closed_intake_rejects_responses() {
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::default();
    let mut schema: FormSchema = create_published_schema();
    schema.accepting_responses = false;

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[]),
        SaveIntent::Draft,
        create_test_time(),
    );

    assert!(matches!(result, Err(ApiError::FormNotAccepting { .. })));
}

#[test]
fn test_invalid_schema_is_rejected() {
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::default();
    let schema: FormSchema = FormSchema::new(
        "form-bad",
        "Bad form",
        vec![
            Field::new("a", FieldKind::Text, "A").with_rule(ConditionalRule::jump_to_field(
                "a",
                RuleOperator::Equals,
                RuleValue::Single(String::from("x")),
                "missing",
            )),
        ],
    )
    .with_status(FormStatus::Published)
    .unwrap();

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[]),
        SaveIntent::Draft,
        create_test_time(),
    );

    assert!(matches!(
        result,
        Err(ApiError::Core(CoreError::InvalidSchema(
            SchemaError::DanglingConditionalTarget { .. }
        )))
    ));
}

#[test]
fn test_existing_draft_is_reused_for_single_response_form() {
    let repository: InMemoryResponseRepository =
        InMemoryResponseRepository::new(vec![create_test_response(
            "resp-existing",
            "form-1",
            "user-1",
            &[("staff", Value::Number(1.0))],
        )]);
    let schema: FormSchema = create_published_schema();

    let response: Response = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-new",
        create_test_values(&[("staff", Value::Number(2.0))]),
        SaveIntent::Draft,
        create_later_time(),
    )
    .unwrap();

    assert_eq!(response.id, "resp-existing");
    assert_eq!(response.created_at, create_test_time());
    assert_eq!(response.last_modified_at, create_later_time());
    assert_eq!(response.value("staff"), &Value::Number(2.0));
}

#[test]
fn test_second_submission_is_rejected_for_single_response_form() {
    let submitted: Response =
        create_test_response("resp-1", "form-1", "user-1", &[("region", Value::text("N"))])
            .submitted(create_test_time())
            .unwrap();
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::new(vec![submitted]);
    let schema: FormSchema = create_published_schema();

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-2",
        create_test_values(&[("region", Value::text("S"))]),
        SaveIntent::Submit,
        create_later_time(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DuplicateResponse { user_id, form_id })
            if user_id == "user-1" && form_id == "form-1"
    ));
}

#[test]
fn test_multiple_responses_allowed_starts_new_response() {
    let submitted: Response =
        create_test_response("resp-1", "form-1", "user-1", &[("region", Value::text("N"))])
            .submitted(create_test_time())
            .unwrap();
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::new(vec![submitted]);
    let mut schema: FormSchema = create_published_schema();
    schema.allow_multiple_responses_per_user = true;

    let response: Response = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-2",
        create_test_values(&[("region", Value::text("S"))]),
        SaveIntent::Submit,
        create_later_time(),
    )
    .unwrap();

    assert_eq!(response.id, "resp-2");
    assert!(response.is_submitted());
}

#[test]
fn test_multiple_responses_submitted_id_cannot_be_saved_again() {
    let submitted: Response =
        create_test_response("resp-1", "form-1", "user-1", &[("region", Value::text("N"))])
            .submitted(create_test_time())
            .unwrap();
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::new(vec![submitted]);
    let mut schema: FormSchema = create_published_schema();
    schema.allow_multiple_responses_per_user = true;

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[("region", Value::text("S"))]),
        SaveIntent::Draft,
        create_later_time(),
    );

    assert!(matches!(
        result,
        Err(ApiError::Domain(DomainError::ResponseAlreadySubmitted { ref response_id }))
            if response_id == "resp-1"
    ));
    assert_eq!(repository.responses()[0].value("region"), &Value::text("N"));
}

#[test]
fn test_multiple_responses_existing_draft_is_updated_in_place() {
    let draft: Response =
        create_test_response("resp-1", "form-1", "user-1", &[("staff", Value::Number(2.0))]);
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::new(vec![draft]);
    let mut schema: FormSchema = create_published_schema();
    schema.allow_multiple_responses_per_user = true;

    let response: Response = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[("staff", Value::Number(5.0))]),
        SaveIntent::Draft,
        create_later_time(),
    )
    .unwrap();

    assert_eq!(response.id, "resp-1");
    assert_eq!(response.status, ResponseStatus::Draft);
    assert_eq!(response.created_at, create_test_time());
    assert_eq!(response.last_modified_at, create_later_time());
    assert_eq!(response.value("staff"), &Value::Number(5.0));
}

#[test]
fn test_response_id_owned_by_another_user_is_rejected() {
    let draft: Response =
        create_test_response("resp-1", "form-1", "user-2", &[("staff", Value::Number(2.0))]);
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::new(vec![draft]);
    let mut schema: FormSchema = create_published_schema();
    schema.allow_multiple_responses_per_user = true;

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-1",
        create_test_values(&[("staff", Value::Number(5.0))]),
        SaveIntent::Draft,
        create_later_time(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResponseMismatch { ref response_id }) if response_id == "resp-1"
    ));
}

#[test]
fn test_other_users_responses_do_not_interfere() {
    let submitted: Response =
        create_test_response("resp-1", "form-1", "user-2", &[("region", Value::text("N"))])
            .submitted(create_test_time())
            .unwrap();
    let repository: InMemoryResponseRepository = InMemoryResponseRepository::new(vec![submitted]);
    let schema: FormSchema = create_published_schema();

    let result: Result<Response, ApiError> = save_response(
        &repository,
        &schema,
        "user-1",
        "resp-2",
        create_test_values(&[("region", Value::text("S"))]),
        SaveIntent::Submit,
        create_test_time(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_upsert_replaces_by_id() {
    let mut repository: InMemoryResponseRepository = InMemoryResponseRepository::default();
    let draft: Response = create_test_response("resp-1", "form-1", "user-1", &[]);
    repository.upsert(draft.clone());
    repository.upsert(draft.submitted(create_later_time()).unwrap());

    assert_eq!(repository.responses().len(), 1);
    assert!(repository.responses()[0].is_submitted());
}
