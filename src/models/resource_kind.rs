//! Resource kind definitions
//!
//! Centralized enum for the Kubernetes kinds that have a dedicated extraction
//! rule. Every other kind string is handled by the generic rule and never
//! needs a variant here.

use std::fmt;
use std::str::FromStr;

/// Kinds with a dedicated extraction rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    // Workloads
    Deployment,
    // Networking
    Service,
    Ingress,
    HTTPProxy,
    // cert-manager
    Certificate,
    // Secrets
    SealedSecret,
    Secret,
}

impl ResourceKind {
    /// Get the manifest `kind` string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::HTTPProxy => "HTTPProxy",
            ResourceKind::Certificate => "Certificate",
            ResourceKind::SealedSecret => "SealedSecret",
            ResourceKind::Secret => "Secret",
        }
    }

    /// Try to parse a manifest `kind`, returning None for kinds without a dedicated rule
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get all recognized kinds
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Deployment,
            ResourceKind::Service,
            ResourceKind::Ingress,
            ResourceKind::HTTPProxy,
            ResourceKind::Certificate,
            ResourceKind::SealedSecret,
            ResourceKind::Secret,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    // Manifest kinds are case-sensitive, so no alias table here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Deployment" => Ok(ResourceKind::Deployment),
            "Service" => Ok(ResourceKind::Service),
            "Ingress" => Ok(ResourceKind::Ingress),
            "HTTPProxy" => Ok(ResourceKind::HTTPProxy),
            "Certificate" => Ok(ResourceKind::Certificate),
            "SealedSecret" => Ok(ResourceKind::SealedSecret),
            "Secret" => Ok(ResourceKind::Secret),
            _ => Err(format!("Unrecognized resource kind: {}", s)),
        }
    }
}
