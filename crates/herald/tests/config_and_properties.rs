//! Configuration wiring and cross-crate properties.

use std::io::Write;

use herald::config::{ConfigLoader, ModeSourceKind};
use herald::prelude::*;
use herald::telemetry::LogConfig;
use herald_test::{envelope, RecordingSink, TestResponse};
use proptest::prelude::*;
use serde_json::json;

fn redacted_message(normalizer: &ErrorNormalizer) -> String {
    let mut sink = RecordingSink::new();
    normalizer.handle(
        UnknownFailure::new().with_message("db password rejected"),
        &RequestContext::new(),
        &mut sink,
    );
    sink.body().unwrap()["message"].as_str().unwrap().to_string()
}

#[test]
fn file_config_drives_normalizer() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[environment]\nmode = \"production\"\n\n[logging]\nformat = \"pretty\"\nlevel = \"debug\""
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_file(file.path())
        .unwrap()
        .load()
        .unwrap();

    assert_eq!(redacted_message(&config.error_normalizer()), "Internal server error");

    let log = LogConfig::from(&config.logging);
    assert!(!log.json_format);
    assert_eq!(log.level, "debug");
}

#[test]
fn env_mode_source_follows_variable() {
    let var = "HERALD_FACADE_TEST_MODE";
    let mut config = HeraldConfig::default();
    config.errors.mode_source = ModeSourceKind::Env;
    config.errors.mode_env_var = var.to_string();
    let normalizer = config.error_normalizer();

    std::env::set_var(var, "production");
    assert_eq!(redacted_message(&normalizer), "Internal server error");

    std::env::set_var(var, "staging");
    assert_eq!(redacted_message(&normalizer), "db password rejected");

    std::env::remove_var(var);
    assert_eq!(redacted_message(&normalizer), "db password rejected");
}

#[tokio::test]
async fn http_round_trip() {
    let mut sink = HttpResponseSink::new();
    respond::success_with(
        &mut sink,
        json!([1, 2, 3]),
        SuccessOptions::new()
            .status_code(201)
            .message("Created")
            .meta_entry("version", json!("v1")),
    );

    let response = TestResponse::from_http(sink.into_response()).await.unwrap();
    response
        .assert_status(201)
        .assert_content_type("application/json")
        .assert_success_envelope();

    let body = response.json_value().unwrap();
    assert_eq!(body["meta"]["version"], "v1");
    envelope::assert_meta_timestamp(&body);
}

#[tokio::test]
async fn envelopes_decode_into_typed_records() {
    let response = ErrorNormalizer::development().into_response(
        UnknownFailure::new().with_message("boom").with_stack("at main"),
        &RequestContext::new().with_request_id("req-7"),
    );

    let decoded: ErrorEnvelope = TestResponse::from_http(response)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert!(!decoded.success);
    assert_eq!(decoded.status_code, 500);
    assert_eq!(decoded.stack.as_deref(), Some("at main"));
    assert_eq!(decoded.meta.get("requestId"), Some(&json!("req-7")));
}

proptest! {
    #[test]
    fn pagination_fields_are_derived(page in 0u64..1000, limit in 1u64..500, total in 0u64..100_000) {
        let mut sink = RecordingSink::new();
        respond::paginated(&mut sink, vec![], PageParams::new(page, limit, total));

        let pagination = &sink.body().unwrap()["pagination"];
        let total_pages = total.div_ceil(limit);
        prop_assert_eq!(&pagination["totalPages"], &json!(total_pages));
        prop_assert_eq!(&pagination["hasNextPage"], &json!(page < total_pages));
        prop_assert_eq!(&pagination["hasPrevPage"], &json!(page > 1));
        prop_assert_eq!(sink.status(), Some(200));
    }

    #[test]
    fn success_flag_ignores_caller_status(status in 100u16..1000, message in "[a-zA-Z ]{0,20}") {
        let mut sink = RecordingSink::new();
        respond::success_with(
            &mut sink,
            json!(null),
            SuccessOptions::new().status_code(status).message(message),
        );
        prop_assert_eq!(&sink.body().unwrap()["success"], &json!(true));

        let mut sink = RecordingSink::new();
        respond::error(&mut sink, "x", status);
        prop_assert_eq!(&sink.body().unwrap()["success"], &json!(false));
    }

    #[test]
    fn timestamp_is_always_well_formed(key in "[a-z]{1,8}", value in any::<i64>()) {
        prop_assume!(key != "timestamp");
        let mut extra = MetaExtras::new();
        extra.insert(key.clone(), json!(value));

        let meta = generate_meta(Some(&extra));
        let body = json!({"meta": meta});
        envelope::assert_meta_timestamp(&body);
        prop_assert_eq!(meta.get(&key), Some(&json!(value)));
    }
}
