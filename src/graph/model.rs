//! Graph nodes, edges and their style hints

use super::identity::NodeId;

/// Rendering hint attached to a node
///
/// The emitter maps each hint to a shape and fill colour; the engine never
/// deals in colours itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStyle {
    /// A top-level resource box, coloured by kind
    Resource(String),
    /// A container inside a pod template
    Container,
    /// Container ports note
    Ports,
    /// Container requests/limits note
    Resources,
    /// Volume mount (folder)
    Mount,
    /// Environment variable (plaintext)
    Env,
    /// Deployment match-label (ellipse)
    Label,
    /// Service selector entry (diamond)
    Selector,
}

impl NodeStyle {
    pub fn resource(kind: impl Into<String>) -> Self {
        NodeStyle::Resource(kind.into())
    }

    /// Short name used in JSON output
    pub fn name(&self) -> &str {
        match self {
            NodeStyle::Resource(kind) => kind,
            NodeStyle::Container => "container",
            NodeStyle::Ports => "ports",
            NodeStyle::Resources => "resources",
            NodeStyle::Mount => "mount",
            NodeStyle::Env => "env",
            NodeStyle::Label => "label",
            NodeStyle::Selector => "selector",
        }
    }
}

/// A node in the flowchart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    /// Display text; lines separated by `\n`
    pub label: String,
    pub style: NodeStyle,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, style: NodeStyle) -> Self {
        Self {
            id,
            label: label.into(),
            style,
        }
    }

    /// Label on one line, e.g. `Deployment / web`
    pub fn summary(&self) -> String {
        self.label.lines().collect::<Vec<_>>().join(" / ")
    }
}

/// Relationship carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Runs,
    Exposes,
    Has,
    Mounts,
    Env,
    References,
    Selects,
    Uses,
    RoutesTo,
    UsesTls,
    Creates,
    UnsealsTo,
    /// Drawn without a label (Service to its selector entries)
    Unlabeled,
}

impl Relation {
    /// Edge label, None for unlabeled edges
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Relation::Runs => Some("runs"),
            Relation::Exposes => Some("exposes"),
            Relation::Has => Some("has"),
            Relation::Mounts => Some("mounts"),
            Relation::Env => Some("env"),
            Relation::References => Some("references"),
            Relation::Selects => Some("selects"),
            Relation::Uses => Some("uses"),
            Relation::RoutesTo => Some("routes to"),
            Relation::UsesTls => Some("uses TLS"),
            Relation::Creates => Some("creates"),
            Relation::UnsealsTo => Some("unseals to"),
            Relation::Unlabeled => None,
        }
    }
}

/// Line style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl EdgeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
            EdgeStyle::Dotted => "dotted",
        }
    }
}

/// A directed, labeled edge
///
/// The target may name a node that no rule ever created (a dangling reference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub relation: Relation,
    pub style: EdgeStyle,
    /// Materialized by the cross-reference pass rather than during the scan
    pub resolved: bool,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, relation: Relation) -> Self {
        Self {
            from,
            to,
            relation,
            style: EdgeStyle::Solid,
            resolved: false,
        }
    }

    /// An edge produced by cross-reference resolution
    pub fn resolved(from: NodeId, to: NodeId, relation: Relation) -> Self {
        Self {
            resolved: true,
            ..Self::new(from, to, relation)
        }
    }

    pub fn dashed(mut self) -> Self {
        self.style = EdgeStyle::Dashed;
        self
    }

    pub fn dotted(mut self) -> Self {
        self.style = EdgeStyle::Dotted;
        self
    }
}
