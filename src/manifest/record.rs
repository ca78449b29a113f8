//! Parsed manifest documents

use super::value::{self, lookup};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// Kind substituted when a document has no `kind`
pub const DEFAULT_KIND: &str = "Unknown";
/// Name substituted when a document has no `metadata.name`
pub const DEFAULT_NAME: &str = "Unnamed";
/// Namespace substituted when a document has no `metadata.namespace`
pub const DEFAULT_NAMESPACE: &str = "default";

/// One document from a manifest stream
///
/// Records are immutable; cloning shares the underlying tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    value: Arc<Value>,
}

impl Record {
    pub fn new(value: Value) -> Self {
        Self {
            value: Arc::new(value),
        }
    }

    /// The raw document tree
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// `kind`, or `Unknown`
    pub fn kind(&self) -> Cow<'_, str> {
        value::text_or(&self.value, &["kind"], DEFAULT_KIND)
    }

    /// `metadata.name`, or `Unnamed`
    pub fn name(&self) -> Cow<'_, str> {
        value::text_or(&self.value, &["metadata", "name"], DEFAULT_NAME)
    }

    /// `metadata.name` without a default
    pub fn declared_name(&self) -> Option<Cow<'_, str>> {
        lookup(&self.value, &["metadata", "name"]).and_then(value::text)
    }

    /// `metadata.namespace`, or `default`
    pub fn namespace(&self) -> Cow<'_, str> {
        value::text_or(&self.value, &["metadata", "namespace"], DEFAULT_NAMESPACE)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
