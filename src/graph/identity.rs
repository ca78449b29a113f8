//! Node identity
//!
//! Ids are plain strings joined with `_`. They are a pure function of the
//! input fields, so running the engine twice over the same records yields the
//! same ids. Records missing a name or namespace get the fixed defaults and
//! therefore collide with each other on purpose: two unnamed Deployments in
//! one namespace merge into a single node.

use std::fmt;

const SEPARATOR: &str = "_";

/// Tag used for volume claims referenced from a pod template
pub const PVC_TAG: &str = "PVC";

/// Deterministic identity of a graph node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

/// Entities nested under a parent node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubKind {
    Container,
    Ports,
    Resources,
    Mount,
    Env,
}

impl SubKind {
    pub fn tag(&self) -> &'static str {
        match self {
            SubKind::Container => "Container",
            SubKind::Ports => "Ports",
            SubKind::Resources => "Resources",
            SubKind::Mount => "Mount",
            SubKind::Env => "Env",
        }
    }
}

/// Key/value entities scoped to a namespace rather than to their owner
///
/// Two Deployments in the same namespace selecting `app=web` share one label node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    Label,
    Selector,
}

impl PairKind {
    pub fn tag(&self) -> &'static str {
        match self {
            PairKind::Label => "Label",
            PairKind::Selector => "Selector",
        }
    }
}

impl NodeId {
    /// Id of a top-level resource: `<kind>_<namespace>_<name>`
    pub fn resource(kind: &str, namespace: &str, name: &str) -> Self {
        Self([kind, namespace, name].join(SEPARATOR))
    }

    /// Id of an entity nested under `self`: `<parent>_<tag>[_<discriminator>]`
    ///
    /// Ports and resource blocks are singular per container and carry no discriminator.
    pub fn child(&self, sub: SubKind, discriminator: Option<&str>) -> Self {
        let mut id = format!("{}{}{}", self.0, SEPARATOR, sub.tag());
        if let Some(discriminator) = discriminator {
            id.push_str(SEPARATOR);
            id.push_str(discriminator);
        }
        Self(id)
    }

    /// Id of a namespace-scoped key/value entity: `<tag>_<namespace>_<key>_<value>`
    pub fn pair(kind: PairKind, namespace: &str, key: &str, value: &str) -> Self {
        Self([kind.tag(), namespace, key, value].join(SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
