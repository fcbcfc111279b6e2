//! Response scenarios exercised through the public facade.
//!
//! Builders and the normalizer are driven into a `RecordingSink`, which
//! also checks that each call sets exactly one status and then sends exactly
//! one body.

use herald::prelude::*;
use herald_test::{envelope, RecordingSink, SinkCall};
use serde_json::{json, Value};

fn body(sink: &RecordingSink) -> &Value {
    sink.assert_single_response();
    sink.body().unwrap()
}

#[test]
fn success_with_defaults() {
    let mut sink = RecordingSink::new();
    respond::success(&mut sink, json!({"id": 1, "name": "John"}));

    assert_eq!(sink.status(), Some(200));
    let body = body(&sink);
    envelope::assert_success_envelope(body, 200);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"], json!({"id": 1, "name": "John"}));

    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 5);
    for key in ["success", "statusCode", "message", "data", "meta"] {
        assert!(keys.contains(&key), "missing {key}");
    }
}

#[test]
fn validation_error_with_no_items() {
    let mut sink = RecordingSink::new();
    respond::validation_error(&mut sink, vec![]);

    assert_eq!(sink.status(), Some(422));
    let body = body(&sink);
    envelope::assert_error_envelope(body, 422, "Validation failed");
    assert_eq!(body["errors"], json!([]));
}

#[test]
fn paginated_last_page() {
    let mut sink = RecordingSink::new();
    respond::paginated(&mut sink, vec![], PageParams::new(5, 10, 50));

    let body = body(&sink);
    envelope::assert_success_envelope(body, 200);
    assert_eq!(
        body["pagination"],
        json!({
            "page": 5,
            "limit": 10,
            "total": 50,
            "totalPages": 5,
            "hasNextPage": false,
            "hasPrevPage": true
        })
    );
}

#[test]
fn paginated_empty_collection() {
    let mut sink = RecordingSink::new();
    respond::paginated(&mut sink, vec![], PageParams::new(1, 20, 0));

    let pagination = &body(&sink)["pagination"];
    assert_eq!(pagination["totalPages"], 0);
    assert_eq!(pagination["hasNextPage"], false);
    assert_eq!(pagination["hasPrevPage"], false);
}

#[test]
fn generic_error_omits_unset_fields() {
    let mut sink = RecordingSink::new();
    respond::error(&mut sink, "Quota exceeded", 429);

    let body = body(&sink);
    envelope::assert_error_envelope(body, 429, "Quota exceeded");
    envelope::assert_field_absent(body, "errors");
    envelope::assert_field_absent(body, "code");
    envelope::assert_field_absent(body, "stack");
}

#[test]
fn operational_error_through_normalizer() {
    let mut sink = RecordingSink::new();
    ErrorNormalizer::production().handle(
        AppError::with_parts("User not found", 404, "USER_NOT_FOUND"),
        &RequestContext::new(),
        &mut sink,
    );

    assert_eq!(sink.calls()[0], SinkCall::Status(404));
    let body = body(&sink);
    envelope::assert_error_envelope(body, 404, "User not found");
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[test]
fn unknown_error_redacted_in_production() {
    let mut sink = RecordingSink::new();
    ErrorNormalizer::production().handle(
        UnknownFailure::new()
            .with_message("Sensitive details")
            .with_stack("at vault::read"),
        &RequestContext::new(),
        &mut sink,
    );

    let body = body(&sink);
    envelope::assert_error_envelope(body, 500, "Internal server error");
    assert_eq!(body["code"], "INTERNAL_ERROR");
    envelope::assert_field_absent(body, "stack");
}

#[test]
fn unknown_error_with_404_kept_in_production() {
    let mut sink = RecordingSink::new();
    ErrorNormalizer::production().handle(
        UnknownFailure::new()
            .with_message("Object does not exist")
            .with_status(404),
        &RequestContext::new(),
        &mut sink,
    );

    envelope::assert_error_envelope(body(&sink), 404, "Object does not exist");
}

#[test]
fn named_constructors_keep_their_defaults() {
    let cases = [
        (AppError::bad_request("Missing email"), 400, "BAD_REQUEST", "Missing email"),
        (AppError::unauthorized(), 401, "UNAUTHORIZED", "Unauthorized"),
        (AppError::forbidden(), 403, "FORBIDDEN", "Forbidden"),
        (AppError::not_found(), 404, "NOT_FOUND", "Resource not found"),
        (AppError::conflict("Duplicate"), 409, "CONFLICT", "Duplicate"),
        (AppError::internal(), 500, "INTERNAL_ERROR", "Internal server error"),
    ];

    for (err, status, code, message) in cases {
        let mut sink = RecordingSink::new();
        ErrorNormalizer::production().handle(err, &RequestContext::new(), &mut sink);

        let body = body(&sink);
        envelope::assert_error_envelope(body, status, message);
        assert_eq!(body["code"], code);
    }
}

#[test]
fn anyhow_context_chain_is_unknown() {
    let result: anyhow::Result<()> = Err(anyhow::anyhow!("pool exhausted"));
    let err = result.map_err(|e| e.context("loading user")).unwrap_err();

    let mut sink = RecordingSink::new();
    ErrorNormalizer::development().handle(err, &RequestContext::new(), &mut sink);

    let body = body(&sink);
    envelope::assert_error_envelope(body, 500, "loading user");
    assert_eq!(body["code"], "INTERNAL_ERROR");
}

#[test]
fn correlation_id_precedence() {
    let ctx = RequestContext::new()
        .with_header("x-request-id", "from-header")
        .with_request_id("from-app");

    let mut sink = RecordingSink::new();
    ErrorNormalizer::production().handle(AppError::forbidden(), &ctx, &mut sink);

    assert_eq!(body(&sink)["meta"]["requestId"], "from-app");
}
