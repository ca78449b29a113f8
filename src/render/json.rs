//! JSON node/edge document

use crate::graph::{Edge, FlowGraph, Node};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GraphDocument<'a> {
    pub nodes: Vec<NodeView<'a>>,
    pub edges: Vec<EdgeView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct NodeView<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub style: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EdgeView<'a> {
    pub from: &'a str,
    pub to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<&'static str>,
    pub style: &'static str,
    pub resolved: bool,
    pub dangling: bool,
}

impl<'a> NodeView<'a> {
    fn of(node: &'a Node) -> Self {
        Self {
            id: node.id.as_str(),
            label: &node.label,
            style: node.style.name(),
        }
    }
}

impl<'a> EdgeView<'a> {
    fn of(edge: &'a Edge, graph: &FlowGraph) -> Self {
        Self {
            from: edge.from.as_str(),
            to: edge.to.as_str(),
            relation: edge.relation.label(),
            style: edge.style.as_str(),
            resolved: edge.resolved,
            dangling: graph.is_dangling(edge),
        }
    }
}

impl<'a> GraphDocument<'a> {
    pub fn of(graph: &'a FlowGraph) -> Self {
        Self {
            nodes: graph.nodes().iter().map(NodeView::of).collect(),
            edges: graph.edges().iter().map(|edge| EdgeView::of(edge, graph)).collect(),
        }
    }
}

/// Pretty-printed JSON for `graph`
pub fn to_json(graph: &FlowGraph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&GraphDocument::of(graph))
}
