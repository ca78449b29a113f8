//! Lenient accessors over untyped manifest trees
//!
//! Manifests are loosely typed: any field may be missing, null, or of an
//! unexpected shape. These helpers treat every such case as "absent" so the
//! extraction rules can substitute placeholders instead of failing.

use serde_json::Value;
use std::borrow::Cow;

/// Walk a chain of object keys, returning None as soon as a step is missing
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Scalar text of a value: strings as-is, numbers and booleans in their
/// literal form. Null, sequences and mappings have no text.
pub fn text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Scalar text at `path`, or `default` when absent
pub fn text_or<'a>(value: &'a Value, path: &[&str], default: &'a str) -> Cow<'a, str> {
    lookup(value, path)
        .and_then(text)
        .unwrap_or(Cow::Borrowed(default))
}

/// Scalar text at `path`, treating an empty string as absent
pub fn non_empty_text<'a>(value: &'a Value, path: &[&str]) -> Option<Cow<'a, str>> {
    lookup(value, path).and_then(text).filter(|s| !s.is_empty())
}

/// Render any value for display. Used where a field is shown
/// verbatim (env literals, label values).
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sequence items at `path`, empty when absent or not a sequence
pub fn items<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Mapping entries at `path` in document order, empty when absent or not a mapping
pub fn entries<'a>(value: &'a Value, path: &[&str]) -> impl Iterator<Item = (&'a str, &'a Value)> {
    lookup(value, path)
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v)))
}

/// True when `key` is present on the mapping, even with a null value
pub fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|map| map.contains_key(key))
}
