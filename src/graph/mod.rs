//! Flowchart graph
//!
//! Node identity, the node/edge model, and the accumulator that one engine
//! run builds up.

pub mod accumulator;
pub mod identity;
pub mod model;

pub use accumulator::{FlowGraph, KindIndex, Phase};
pub use identity::{NodeId, PVC_TAG, PairKind, SubKind};
pub use model::{Edge, EdgeStyle, Node, NodeStyle, Relation};
