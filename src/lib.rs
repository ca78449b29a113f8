//! k8sflowgen library
//!
//! Builds a relationship flowchart from Kubernetes manifests: records are
//! loaded from YAML, projected into nodes and edges by per-kind extraction
//! rules, cross-linked by selector resolution and finally rendered as DOT,
//! JSON or a Graphviz artifact. It can be used both as a binary and as a
//! library for testing.

pub mod cli;
pub mod config;
pub mod extract;
pub mod graph;
pub mod manifest;
pub mod models;
pub mod render;
pub mod resolve;

// Re-export commonly used types for convenience
pub use extract::{ExtractionRule, FlowchartEngine, RuleRegistry, RunSummary, ScanContext};
pub use graph::{Edge, EdgeStyle, FlowGraph, Node, NodeId, NodeStyle, Phase, Relation};
pub use manifest::{LoadError, Record, load_manifests, parse_manifests};
pub use models::ResourceKind;
pub use render::{DotOptions, RenderError, to_dot, to_json};
