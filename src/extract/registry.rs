//! Rule registry
//!
//! Maps a manifest `kind` to the rule that extracts it. Adding support for a
//! kind means registering a rule; nothing else changes. Kinds with no entry
//! use the generic rule.

use super::{
    CertificateRule, DeploymentRule, ExtractionRule, GenericRule, HttpProxyRule, IngressRule,
    SealedSecretRule, SecretRule, ServiceRule,
};
use crate::models::ResourceKind;
use std::collections::HashMap;

pub struct RuleRegistry {
    rules: HashMap<String, Box<dyn ExtractionRule>>,
    fallback: Box<dyn ExtractionRule>,
}

impl RuleRegistry {
    /// Create a registry with no dedicated rules; everything is generic
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            fallback: Box::new(GenericRule),
        }
    }

    /// Create a registry with a rule for every [`ResourceKind`]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for kind in ResourceKind::all() {
            let rule: Box<dyn ExtractionRule> = match kind {
                ResourceKind::Deployment => Box::new(DeploymentRule),
                ResourceKind::Service => Box::new(ServiceRule),
                ResourceKind::Ingress => Box::new(IngressRule),
                ResourceKind::HTTPProxy => Box::new(HttpProxyRule),
                ResourceKind::Certificate => Box::new(CertificateRule),
                ResourceKind::SealedSecret => Box::new(SealedSecretRule),
                ResourceKind::Secret => Box::new(SecretRule),
            };
            registry.rules.insert(kind.as_str().to_string(), rule);
        }
        registry
    }

    /// Register a rule for `kind`, returning the rule it replaced
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        rule: Box<dyn ExtractionRule>,
    ) -> Option<Box<dyn ExtractionRule>> {
        self.rules.insert(kind.into(), rule)
    }

    /// Rule for `kind`, falling back to the generic rule
    pub fn rule_for(&self, kind: &str) -> &dyn ExtractionRule {
        self.rules
            .get(kind)
            .map(|rule| rule.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    /// Check if a dedicated rule is registered for `kind`
    pub fn contains(&self, kind: &str) -> bool {
        self.rules.contains_key(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
