//! Multi-document manifest loading

use super::{LoadError, Record};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Parse a multi-document YAML stream into records, in document order
///
/// Empty documents (a bare `---`, or a trailing separator) are skipped. Merge
/// keys (`<<: *anchor`) are expanded before a document becomes a record.
pub fn parse_manifests(contents: &str) -> Result<Vec<Record>, serde_yaml::Error> {
    let mut records = Vec::new();

    for (idx, document) in serde_yaml::Deserializer::from_str(contents).enumerate() {
        let mut yaml = serde_yaml::Value::deserialize(document)?;
        if yaml.is_null() {
            tracing::warn!("Skipping empty document at position {}", idx);
            continue;
        }
        yaml.apply_merge()?;
        records.push(Record::new(yaml_to_json(&yaml)?));
    }

    tracing::debug!("Parsed {} manifest documents", records.len());
    Ok(records)
}

/// Convert a YAML tree, stringifying scalar mapping keys such as `1: a`
fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, serde_yaml::Error> {
    serde_json::to_value(yaml).map_err(<serde_yaml::Error as serde::de::Error>::custom)
}

/// Load and parse a manifest file
pub fn load_manifests(path: &Path) -> Result<Vec<Record>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_manifests(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple_documents() {
        let yaml = r#"
kind: Deployment
metadata:
  name: web
---
kind: Service
metadata:
  name: web-svc
"#;
        let records = parse_manifests(yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind(), "Deployment");
        assert_eq!(records[1].name(), "web-svc");
    }

    #[test]
    fn test_skips_empty_documents() {
        let yaml = "---\nkind: Secret\n---\n---\n";
        let records = parse_manifests(yaml).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), "Secret");
    }

    #[test]
    fn test_merge_keys_are_expanded() {
        let yaml = r#"
kind: Deployment
metadata:
  name: web
  labels: &labels
    app: web
spec:
  template:
    metadata:
      labels:
        <<: *labels
        tier: frontend
"#;
        let records = parse_manifests(yaml).unwrap();
        let labels = records[0]
            .value()
            .pointer("/spec/template/metadata/labels")
            .unwrap();
        assert_eq!(labels, &serde_json::json!({"app": "web", "tier": "frontend"}));
    }

    #[test]
    fn test_scalar_keys_become_text() {
        let records = parse_manifests("kind: ConfigMap\ndata:\n  1: one\n").unwrap();
        let data = records[0].value().get("data").unwrap();
        assert_eq!(data.get("1"), Some(&serde_json::json!("one")));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let yaml = "kind: [unterminated";
        assert!(parse_manifests(yaml).is_err());
    }
}
