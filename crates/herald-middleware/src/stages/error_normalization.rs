//! Error normalization stage.
//!
//! The [`ErrorNormalizer`] is the terminal consumer of every failure a handler
//! raises. It classifies the failure, applies the disclosure policy of the
//! current [`DeploymentMode`], stamps the envelope with metadata and the
//! request's correlation id, and writes exactly one status and one body to the
//! sink. It never fails and never calls a continuation.
//!
//! # Disclosure policy
//!
//! | Failure | Mode | Status | Message | Code | Stack |
//! |---|---|---|---|---|---|
//! | Operational | any | own | own | own | never |
//! | Unknown, status 500 | production | 500 | `"Internal server error"` | `INTERNAL_ERROR` | never |
//! | Unknown, other status | production | own | own or fallback | `INTERNAL_ERROR` | never |
//! | Unknown | non-production | own or 500 | own or fallback | `INTERNAL_ERROR` | if carried |
//!
//! # Example
//!
//! ```
//! use herald_core::{AppError, DeploymentMode, RequestContext};
//! use herald_middleware::{ErrorNormalizer, HttpResponseSink};
//!
//! let normalizer = ErrorNormalizer::new(DeploymentMode::Production);
//! let ctx = RequestContext::new().with_request_id("req-1");
//!
//! let mut sink = HttpResponseSink::new();
//! normalizer.handle(
//!     AppError::with_parts("User not found", 404, "USER_NOT_FOUND"),
//!     &ctx,
//!     &mut sink,
//! );
//!
//! let body = sink.body().unwrap();
//! assert_eq!(sink.status_code(), Some(404));
//! assert_eq!(body["code"], "USER_NOT_FOUND");
//! assert_eq!(body["meta"]["requestId"], "req-1");
//! ```

use herald_core::error::{codes, messages};
use herald_core::{
    generate_meta, AppError, DeploymentMode, ErrorEnvelope, Failure, MetaExtras, RequestContext,
    ResponseMeta, UnknownFailure,
};
use serde_json::Value;

use crate::respond;
use crate::sink::{HttpResponseSink, Response, ResponseSink};

/// Meta key carrying the correlation id.
pub const REQUEST_ID_META_KEY: &str = "requestId";

/// Where the normalizer reads the deployment mode from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSource {
    /// A mode fixed at construction.
    Fixed(DeploymentMode),
    /// An environment variable, read on every invocation.
    ///
    /// An unset or non-UTF-8 variable means [`DeploymentMode::Development`].
    Env(String),
}

impl ModeSource {
    /// Resolves the current mode.
    #[must_use]
    pub fn resolve(&self) -> DeploymentMode {
        match self {
            Self::Fixed(mode) => mode.clone(),
            Self::Env(var) => std::env::var(var)
                .map(|value| DeploymentMode::parse(&value))
                .unwrap_or_default(),
        }
    }
}

impl From<DeploymentMode> for ModeSource {
    fn from(mode: DeploymentMode) -> Self {
        Self::Fixed(mode)
    }
}

/// Converts any failure into an [`ErrorEnvelope`] and sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNormalizer {
    mode_source: ModeSource,
}

impl Default for ErrorNormalizer {
    fn default() -> Self {
        Self::development()
    }
}

impl ErrorNormalizer {
    /// Creates a normalizer with a fixed deployment mode.
    #[must_use]
    pub fn new(mode: DeploymentMode) -> Self {
        Self::with_mode_source(ModeSource::Fixed(mode))
    }

    /// Creates a normalizer with an explicit mode source.
    #[must_use]
    pub const fn with_mode_source(mode_source: ModeSource) -> Self {
        Self { mode_source }
    }

    /// Creates a normalizer fixed to production mode.
    #[must_use]
    pub fn production() -> Self {
        Self::new(DeploymentMode::Production)
    }

    /// Creates a normalizer fixed to development mode.
    #[must_use]
    pub fn development() -> Self {
        Self::new(DeploymentMode::Development)
    }

    /// Creates a normalizer that reads the mode from `var` on every call.
    #[must_use]
    pub fn from_env_var(var: impl Into<String>) -> Self {
        Self::with_mode_source(ModeSource::Env(var.into()))
    }

    /// Stage name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        "error_normalization"
    }

    /// Returns the configured mode source.
    #[must_use]
    pub const fn mode_source(&self) -> &ModeSource {
        &self.mode_source
    }

    /// Returns the mode in effect right now.
    #[must_use]
    pub fn current_mode(&self) -> DeploymentMode {
        self.mode_source.resolve()
    }

    /// Builds the envelope for `failure` without sending it.
    #[must_use]
    pub fn normalize(&self, failure: &Failure, ctx: &RequestContext) -> ErrorEnvelope {
        let correlation_id = ctx.correlation_id();
        let mut extra = MetaExtras::new();
        if let Some(id) = correlation_id {
            extra.insert(REQUEST_ID_META_KEY.to_string(), Value::from(id));
        }
        let meta = generate_meta(Some(&extra));

        match failure {
            Failure::Operational(err) => {
                log_operational(err, correlation_id);
                err.to_envelope(meta)
            }
            Failure::Unknown(unknown) => {
                let mode = self.current_mode();
                log_unknown(unknown, &mode, correlation_id);
                unknown_envelope(unknown, &mode, meta)
            }
        }
    }

    /// Normalizes `failure` and writes the result to `sink`.
    pub fn handle<'s, S: ResponseSink>(
        &self,
        failure: impl Into<Failure>,
        ctx: &RequestContext,
        sink: &'s mut S,
    ) -> &'s mut S {
        let envelope = self.normalize(&failure.into(), ctx);
        respond::send_error(sink, &envelope)
    }

    /// Middleware-shaped entry point.
    ///
    /// `next` is dropped without being called: the normalizer is always the
    /// last stage for a failure.
    pub fn handle_with_next<'s, S: ResponseSink, N>(
        &self,
        failure: impl Into<Failure>,
        ctx: &RequestContext,
        sink: &'s mut S,
        next: N,
    ) -> &'s mut S {
        drop(next);
        self.handle(failure, ctx, sink)
    }

    /// Normalizes `failure` straight into an HTTP response.
    #[must_use]
    pub fn into_response(&self, failure: impl Into<Failure>, ctx: &RequestContext) -> Response {
        let mut sink = HttpResponseSink::new();
        self.handle(failure, ctx, &mut sink);
        sink.into_response()
    }
}

fn unknown_envelope(
    unknown: &UnknownFailure,
    mode: &DeploymentMode,
    meta: ResponseMeta,
) -> ErrorEnvelope {
    let status_code = unknown.effective_status();

    if mode.is_production() && status_code == 500 {
        return ErrorEnvelope::new(status_code, messages::INTERNAL_SERVER_ERROR, meta)
            .with_code(codes::INTERNAL_ERROR);
    }

    let message = unknown
        .message()
        .filter(|message| !message.is_empty())
        .unwrap_or(messages::UNEXPECTED_ERROR);
    let envelope =
        ErrorEnvelope::new(status_code, message, meta).with_code(codes::INTERNAL_ERROR);

    match unknown.stack() {
        Some(stack) if !mode.is_production() => envelope.with_stack(stack),
        _ => envelope,
    }
}

fn log_operational(err: &AppError, request_id: Option<&str>) {
    if err.status_code() >= 500 {
        tracing::warn!(
            request_id = request_id.unwrap_or_default(),
            http.status_code = err.status_code(),
            error.code = err.code(),
            backtrace = %err.backtrace(),
            "Operational failure: {}",
            err.message()
        );
    } else {
        tracing::debug!(
            request_id = request_id.unwrap_or_default(),
            http.status_code = err.status_code(),
            error.code = err.code(),
            "Operational failure: {}",
            err.message()
        );
    }
}

fn log_unknown(unknown: &UnknownFailure, mode: &DeploymentMode, request_id: Option<&str>) {
    tracing::error!(
        request_id = request_id.unwrap_or_default(),
        http.status_code = unknown.effective_status(),
        error.code = codes::INTERNAL_ERROR,
        mode = %mode,
        "Unhandled failure: {}",
        unknown.message().unwrap_or("<no message>")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::REQUEST_ID_HEADER;
    use proptest::prelude::*;
    use serde_json::json;

    fn run(normalizer: &ErrorNormalizer, failure: impl Into<Failure>) -> (u16, Value) {
        let mut sink = HttpResponseSink::new();
        normalizer.handle(failure, &RequestContext::new(), &mut sink);
        (
            sink.status_code().expect("status"),
            sink.body().cloned().expect("body"),
        )
    }

    #[test]
    fn test_name() {
        assert_eq!(ErrorNormalizer::default().name(), "error_normalization");
    }

    #[test]
    fn test_operational_failure_passes_through() {
        let (status, body) = run(
            &ErrorNormalizer::production(),
            AppError::with_parts("User not found", 404, "USER_NOT_FOUND"),
        );

        assert_eq!(status, 404);
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "User not found");
        assert_eq!(body["code"], "USER_NOT_FOUND");
        assert!(body.get("stack").is_none());
        assert!(body["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_operational_500_is_not_redacted() {
        let (status, body) = run(
            &ErrorNormalizer::production(),
            AppError::new("Payment provider unreachable"),
        );

        assert_eq!(status, 500);
        assert_eq!(body["message"], "Payment provider unreachable");
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }

    #[test]
    fn test_unknown_redacted_in_production() {
        let failure = UnknownFailure::new()
            .with_message("Sensitive details")
            .with_stack("at db::query");
        let (status, body) = run(&ErrorNormalizer::production(), failure);

        assert_eq!(status, 500);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(body.get("stack").is_none());
    }

    #[test]
    fn test_unknown_with_explicit_500_redacted_in_production() {
        let failure = UnknownFailure::new().with_message("secret").with_status(500);
        let (_, body) = run(&ErrorNormalizer::production(), failure);
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn test_unknown_non_500_kept_in_production() {
        let failure = UnknownFailure::new()
            .with_message("Upstream record missing")
            .with_status(404)
            .with_stack("at client::get");
        let (status, body) = run(&ErrorNormalizer::production(), failure);

        assert_eq!(status, 404);
        assert_eq!(body["message"], "Upstream record missing");
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(body.get("stack").is_none());
    }

    #[test]
    fn test_unknown_in_development_keeps_message_and_stack() {
        let failure = UnknownFailure::new()
            .with_message("Sensitive details")
            .with_stack("at db::query");
        let (status, body) = run(&ErrorNormalizer::development(), failure);

        assert_eq!(status, 500);
        assert_eq!(body["message"], "Sensitive details");
        assert_eq!(body["stack"], "at db::query");
    }

    #[test]
    fn test_unknown_without_message_uses_fallback() {
        let (_, body) = run(&ErrorNormalizer::development(), UnknownFailure::new());
        assert_eq!(body["message"], "An unexpected error occurred");
        assert!(body.get("stack").is_none());

        let (_, body) = run(
            &ErrorNormalizer::development(),
            UnknownFailure::new().with_message(""),
        );
        assert_eq!(body["message"], "An unexpected error occurred");
    }

    #[test]
    fn test_test_mode_is_not_production() {
        let failure = UnknownFailure::new().with_message("visible");
        let (_, body) = run(&ErrorNormalizer::new(DeploymentMode::Test), failure);
        assert_eq!(body["message"], "visible");
    }

    #[test]
    fn test_mode_match_is_case_sensitive() {
        let normalizer = ErrorNormalizer::new(DeploymentMode::parse("Production"));
        let (_, body) = run(&normalizer, UnknownFailure::new().with_message("visible"));
        assert_eq!(body["message"], "visible");
    }

    #[test]
    fn test_anyhow_error_is_classified() {
        let (status, body) = run(
            &ErrorNormalizer::production(),
            anyhow::Error::new(AppError::forbidden()),
        );
        assert_eq!(status, 403);
        assert_eq!(body["code"], "FORBIDDEN");

        let (status, body) = run(
            &ErrorNormalizer::production(),
            anyhow::anyhow!("connection refused"),
        );
        assert_eq!(status, 500);
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn test_request_id_attached_to_meta() {
        let normalizer = ErrorNormalizer::production();
        let ctx = RequestContext::new()
            .with_request_id("internal")
            .with_header(REQUEST_ID_HEADER, "external");

        let envelope = normalizer.normalize(&AppError::not_found().into(), &ctx);
        assert_eq!(envelope.meta.get("requestId"), Some(&json!("internal")));

        let ctx = RequestContext::new().with_header(REQUEST_ID_HEADER, "external");
        let envelope = normalizer.normalize(&AppError::not_found().into(), &ctx);
        assert_eq!(envelope.meta.get("requestId"), Some(&json!("external")));
    }

    #[test]
    fn test_no_request_id_when_absent() {
        let envelope =
            ErrorNormalizer::production().normalize(&AppError::not_found().into(), &RequestContext::new());
        assert!(!envelope.meta.contains_key("requestId"));
        assert!(envelope.meta.timestamp().is_some());
    }

    #[test]
    fn test_continuation_is_never_called() {
        let mut called = false;
        let mut sink = HttpResponseSink::new();
        ErrorNormalizer::production().handle_with_next(
            AppError::conflict("taken"),
            &RequestContext::new(),
            &mut sink,
            || called = true,
        );

        assert!(!called);
        assert_eq!(sink.status_code(), Some(409));
    }

    #[test]
    fn test_env_mode_source_is_read_per_call() {
        let var = "HERALD_TEST_MODE_PER_CALL";
        let normalizer = ErrorNormalizer::from_env_var(var);

        std::env::remove_var(var);
        assert_eq!(normalizer.current_mode(), DeploymentMode::Development);

        std::env::set_var(var, "production");
        let (_, body) = run(&normalizer, UnknownFailure::new().with_message("secret"));
        assert_eq!(body["message"], "Internal server error");

        std::env::set_var(var, "development");
        let (_, body) = run(&normalizer, UnknownFailure::new().with_message("secret"));
        assert_eq!(body["message"], "secret");

        std::env::remove_var(var);
    }

    #[test]
    fn test_into_response() {
        let response =
            ErrorNormalizer::production().into_response(AppError::unauthorized(), &RequestContext::new());
        assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
    }

    fn any_mode() -> impl Strategy<Value = DeploymentMode> {
        prop_oneof![
            Just(DeploymentMode::Production),
            Just(DeploymentMode::Development),
            Just(DeploymentMode::Test),
        ]
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_operational_5xx_log_carries_backtrace() {
        let output = capture_logs(|| {
            run(&ErrorNormalizer::production(), AppError::new("Ledger unavailable"));
        });

        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("backtrace="), "{output}");
        assert!(output.contains("Ledger unavailable"), "{output}");
    }

    #[test]
    fn test_operational_4xx_log_has_no_backtrace() {
        let output = capture_logs(|| {
            run(&ErrorNormalizer::production(), AppError::not_found());
        });

        assert!(output.contains("DEBUG"), "{output}");
        assert!(!output.contains("backtrace="), "{output}");
    }

    proptest! {
        #[test]
        fn prop_operational_fields_survive_any_mode(
            mode in any_mode(),
            status in 400u16..600,
            code in "[A-Z_]{1,16}",
            message in "[a-zA-Z ]{1,32}",
        ) {
            let normalizer = ErrorNormalizer::new(mode);
            let failure = AppError::with_parts(message.clone(), status, code.clone());
            let envelope = normalizer.normalize(&failure.into(), &RequestContext::new());

            prop_assert_eq!(envelope.status_code, status);
            prop_assert_eq!(envelope.code.as_deref(), Some(code.as_str()));
            prop_assert_eq!(envelope.message, message);
            prop_assert!(!envelope.success);
        }

        #[test]
        fn prop_production_never_leaks_stack(
            status in proptest::option::of(400u16..600),
            message in "[a-z ]{0,32}",
        ) {
            let mut failure = UnknownFailure::new().with_message(message).with_stack("trace");
            if let Some(status) = status {
                failure = failure.with_status(status);
            }
            let envelope = ErrorNormalizer::production()
                .normalize(&failure.into(), &RequestContext::new());

            prop_assert!(envelope.stack.is_none());
            prop_assert_eq!(envelope.code.as_deref(), Some("INTERNAL_ERROR"));
            if envelope.status_code == 500 {
                prop_assert_eq!(envelope.message.as_str(), "Internal server error");
            }
        }
    }
}
