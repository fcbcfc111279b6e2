//! Response metadata.
//!
//! Every envelope carries a `meta` object. It always starts with a
//! `timestamp` (ISO-8601, millisecond precision, UTC `Z` suffix) and may be
//! extended with caller-supplied entries such as `requestId`.
//!
//! Extra entries are merged *after* the timestamp is written, so an extra
//! `timestamp` key replaces the generated value.

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which the generation timestamp is stored.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Caller-supplied metadata entries, kept in insertion order.
pub type MetaExtras = IndexMap<String, Value>;

/// Metadata record attached to every response envelope.
///
/// # Example
///
/// ```
/// use herald_core::{generate_meta, MetaExtras};
/// use serde_json::json;
///
/// let mut extra = MetaExtras::new();
/// extra.insert("requestId".to_string(), json!("req-1"));
///
/// let meta = generate_meta(Some(&extra));
/// assert!(meta.timestamp().is_some());
/// assert_eq!(meta.get("requestId"), Some(&json!("req-1")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMeta(IndexMap<String, Value>);

impl ResponseMeta {
    /// Creates metadata holding only a fresh timestamp.
    #[must_use]
    pub fn now() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(TIMESTAMP_KEY.to_string(), Value::String(current_timestamp()));
        Self(entries)
    }

    /// Creates metadata with a fresh timestamp, then overlays `extra`.
    #[must_use]
    pub fn with_extra(extra: &MetaExtras) -> Self {
        let mut meta = Self::now();
        for (key, value) in extra {
            meta.0.insert(key.clone(), value.clone());
        }
        meta
    }

    /// Returns the `timestamp` entry when it is a string.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.0.get(TIMESTAMP_KEY).and_then(Value::as_str)
    }

    /// Returns the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if an entry exists under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self::now()
    }
}

/// Builds the metadata record for one response.
///
/// Equivalent to [`ResponseMeta::with_extra`] when `extra` is given and
/// [`ResponseMeta::now`] otherwise.
#[must_use]
pub fn generate_meta(extra: Option<&MetaExtras>) -> ResponseMeta {
    match extra {
        Some(extra) => ResponseMeta::with_extra(extra),
        None => ResponseMeta::now(),
    }
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn test_timestamp_always_present() {
        let meta = generate_meta(None);
        assert_eq!(meta.len(), 1);
        assert!(meta.timestamp().is_some());
    }

    #[test]
    fn test_timestamp_format() {
        let meta = ResponseMeta::now();
        let ts = meta.timestamp().unwrap();

        // 2024-01-01T00:00:00.000Z
        assert_eq!(ts.len(), 24);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[19..20], ".");
    }

    #[test]
    fn test_timestamp_round_trips() {
        let meta = ResponseMeta::now();
        let ts = meta.timestamp().unwrap();

        let parsed = DateTime::parse_from_rfc3339(ts).expect("timestamp should be RFC 3339");
        let formatted = parsed
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        assert_eq!(formatted, ts);
    }

    #[test]
    fn test_extra_entries_are_merged() {
        let mut extra = MetaExtras::new();
        extra.insert("requestId".to_string(), json!("abc"));
        extra.insert("version".to_string(), json!(2));

        let meta = generate_meta(Some(&extra));
        assert_eq!(meta.len(), 3);
        assert_eq!(meta.get("requestId"), Some(&json!("abc")));
        assert_eq!(meta.get("version"), Some(&json!(2)));
    }

    #[test]
    fn test_extra_timestamp_overrides_generated() {
        let mut extra = MetaExtras::new();
        extra.insert(TIMESTAMP_KEY.to_string(), json!("custom"));

        let meta = generate_meta(Some(&extra));
        assert_eq!(meta.timestamp(), Some("custom"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_timestamp_is_first_key() {
        let mut extra = MetaExtras::new();
        extra.insert("a".to_string(), json!(1));
        extra.insert("b".to_string(), json!(2));

        let meta = generate_meta(Some(&extra));
        let keys: Vec<&str> = meta.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["timestamp", "a", "b"]);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut extra = MetaExtras::new();
        extra.insert("requestId".to_string(), json!("req-9"));
        let meta = generate_meta(Some(&extra));

        let value = serde_json::to_value(&meta).unwrap();
        assert!(value.is_object());
        assert_eq!(value["requestId"], "req-9");
        assert!(value["timestamp"].is_string());
    }
}
