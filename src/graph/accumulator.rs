//! The graph under construction
//!
//! One [`FlowGraph`] is owned by exactly one engine run. It holds the node
//! set (deduplicated by id, kept in creation order), the append-only edge
//! list, and one index per recognized kind for the cross-reference pass.

use super::identity::NodeId;
use super::model::{Edge, Node};
use crate::manifest::Record;
use crate::models::ResourceKind;
use std::collections::HashMap;

/// Engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Forward pass: rules run and indexes fill up
    #[default]
    Scanning,
    /// Second pass: indexes are read-only, only edges are added
    Resolving,
}

/// Records of one kind, in first-seen order
///
/// Re-indexing an id replaces the stored record but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct KindIndex {
    entries: Vec<(NodeId, Record)>,
    positions: HashMap<NodeId, usize>,
}

impl KindIndex {
    fn insert(&mut self, id: NodeId, record: Record) {
        if let Some(&pos) = self.positions.get(&id) {
            self.entries[pos].1 = record;
        } else {
            self.positions.insert(id.clone(), self.entries.len());
            self.entries.push((id, record));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Record)> {
        self.entries.iter().map(|(id, record)| (id, record))
    }
}

/// Nodes, edges and kind indexes for one run
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    indexes: HashMap<ResourceKind, KindIndex>,
    phase: Phase,
}

impl FlowGraph {
    /// Create a new empty graph in the scanning phase
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Add a node, or update the label and style of an existing node with the same id
    ///
    /// An updated node keeps its original position; edges already drawn are untouched.
    pub fn add_node(&mut self, node: Node) {
        if let Some(&index) = self.node_index.get(&node.id) {
            tracing::trace!("Updating existing node {}", node.id);
            self.nodes[index] = node;
        } else {
            self.node_index.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
        }
    }

    /// Append an edge; duplicates are kept
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Register a record for the cross-reference pass
    ///
    /// Ignored once resolution has started.
    pub fn index_record(&mut self, kind: ResourceKind, id: NodeId, record: Record) {
        if self.phase != Phase::Scanning {
            tracing::warn!("Ignoring index registration of {} after scan completed", id);
            return;
        }
        tracing::debug!("Indexing {} as {}", id, kind);
        self.indexes.entry(kind).or_default().insert(id, record);
    }

    /// All indexed records of `kind`, in first-seen order
    pub fn all_of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = (&NodeId, &Record)> {
        self.indexes
            .get(&kind)
            .into_iter()
            .flat_map(|index| index.iter())
    }

    /// Number of indexed records of `kind`
    pub fn indexed_count(&self, kind: ResourceKind) -> usize {
        self.indexes.get(&kind).map_or(0, KindIndex::len)
    }

    /// Close the scan; indexes become read-only
    pub fn begin_resolution(&mut self) {
        self.phase = Phase::Resolving;
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in creation order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_index.get(id).map(|&index| &self.nodes[index])
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node_index.contains_key(id)
    }

    /// True if either endpoint of `edge` has no node
    pub fn is_dangling(&self, edge: &Edge) -> bool {
        !self.contains_node(&edge.from) || !self.contains_node(&edge.to)
    }

    /// Edges pointing at (or from) ids no rule created
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| self.is_dangling(edge))
    }
}
