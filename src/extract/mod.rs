//! Extraction rules
//!
//! Each recognized `kind` has a rule that projects one record into nodes and
//! edges on the shared [`FlowGraph`]. Rules are looked up through a
//! [`RuleRegistry`]; any kind without a rule falls through to
//! [`GenericRule`], which draws a single node and no edges.
//!
//! Rules never fail. Absent fields become placeholder text, and references to
//! records that do not exist still produce an edge.

mod engine;
mod generic;
mod network;
mod registry;
mod secrets;
mod workload;

pub use engine::{FlowchartEngine, RunSummary};
pub use generic::GenericRule;
pub use network::{HttpProxyRule, IngressRule, ServiceRule};
pub use registry::RuleRegistry;
pub use secrets::{CertificateRule, SealedSecretRule, SecretRule};
pub use workload::DeploymentRule;

use crate::graph::{FlowGraph, Node, NodeId, NodeStyle};
use crate::manifest::Record;

/// State handed to every rule during the forward scan
pub struct ScanContext<'a> {
    /// The graph being built
    pub graph: &'a mut FlowGraph,
    /// Every record in the input, for rules that look up siblings inline
    pub records: &'a [Record],
}

/// Projects records of one kind into the graph
pub trait ExtractionRule: Send + Sync {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>);
}

/// Add the `<kind>\n<name>` box every top-level record gets, returning its id
pub(crate) fn add_resource_node(record: &Record, graph: &mut FlowGraph) -> NodeId {
    add_resource_node_with_label(record, graph, |kind, name| format!("{}\n{}", kind, name))
}

pub(crate) fn add_resource_node_with_label(
    record: &Record,
    graph: &mut FlowGraph,
    label: impl FnOnce(&str, &str) -> String,
) -> NodeId {
    let kind = record.kind();
    let name = record.name();
    let id = NodeId::resource(&kind, &record.namespace(), &name);
    graph.add_node(Node::new(
        id.clone(),
        label(kind.as_ref(), name.as_ref()),
        NodeStyle::resource(kind.as_ref()),
    ));
    id
}
