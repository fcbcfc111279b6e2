//! Envelope assertions on decoded JSON bodies.
//!
//! These work on any `serde_json::Value`, so they apply equally to a
//! [`RecordingSink`](crate::RecordingSink) body and a decoded
//! [`TestResponse`](crate::TestResponse).

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Asserts `meta.timestamp` is an RFC 3339 UTC timestamp with millisecond
/// precision that re-formats to itself.
///
/// # Panics
///
/// Panics if `meta` or `meta.timestamp` is missing or malformed.
pub fn assert_meta_timestamp(body: &Value) {
    let timestamp = body["meta"]["timestamp"]
        .as_str()
        .unwrap_or_else(|| panic!("meta.timestamp missing in {body}"));
    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .unwrap_or_else(|e| panic!("meta.timestamp '{timestamp}' is not RFC 3339: {e}"));
    let formatted = parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    assert_eq!(
        formatted, timestamp,
        "meta.timestamp should be UTC with millisecond precision"
    );
}

/// Asserts `body` is a success envelope with the given status.
///
/// # Panics
///
/// Panics if `success` is not `true`, `statusCode` differs, `message` is not
/// a string, or `meta.timestamp` is invalid.
pub fn assert_success_envelope(body: &Value, status_code: u16) {
    assert_eq!(body["success"], true, "Expected success envelope, got {body}");
    assert_eq!(
        body["statusCode"], status_code,
        "Expected statusCode {status_code}, got {body}"
    );
    assert!(body["message"].is_string(), "message missing in {body}");
    assert_meta_timestamp(body);
}

/// Asserts `body` is an error envelope with the given status and message.
///
/// # Panics
///
/// Panics if `success` is not `false`, `statusCode` or `message` differ, or
/// `meta.timestamp` is invalid.
pub fn assert_error_envelope(body: &Value, status_code: u16, message: &str) {
    assert_eq!(body["success"], false, "Expected error envelope, got {body}");
    assert_eq!(
        body["statusCode"], status_code,
        "Expected statusCode {status_code}, got {body}"
    );
    assert_eq!(body["message"], message, "Unexpected message in {body}");
    assert_meta_timestamp(body);
}

/// Asserts `body` has no `key` at the top level.
///
/// Optional envelope fields are omitted, never `null`.
///
/// # Panics
///
/// Panics if the key is present.
pub fn assert_field_absent(body: &Value, key: &str) {
    assert!(
        body.get(key).is_none(),
        "Field '{key}' should be absent, got {body}"
    );
}
