//! The two-phase flowchart engine
//!
//! A run is one blocking call: scan every record in order through its rule,
//! then resolve cross-references against the completed indexes. Each run owns
//! its own [`FlowGraph`], so separate inputs can be processed on separate
//! threads without coordination.

use super::{RuleRegistry, ScanContext};
use crate::graph::FlowGraph;
use crate::manifest::Record;
use crate::resolve;

/// Counts describing one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub records: usize,
    pub nodes: usize,
    pub edges: usize,
    pub resolved_edges: usize,
    pub dangling_edges: usize,
}

impl RunSummary {
    pub fn of(graph: &FlowGraph, records: usize) -> Self {
        Self {
            records,
            nodes: graph.nodes().len(),
            edges: graph.edges().len(),
            resolved_edges: graph.edges().iter().filter(|e| e.resolved).count(),
            dangling_edges: graph.dangling_edges().count(),
        }
    }
}

/// Builds a [`FlowGraph`] from records
#[derive(Debug, Default)]
pub struct FlowchartEngine {
    registry: RuleRegistry,
}

impl FlowchartEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Scan then resolve `records`, in input order
    pub fn run(&self, records: &[Record]) -> FlowGraph {
        let mut graph = FlowGraph::new();
        self.scan(records, &mut graph);

        graph.begin_resolution();
        let resolved = resolve::resolve_service_selectors(&mut graph);
        tracing::debug!("Resolution pass added {} edges", resolved);

        let summary = RunSummary::of(&graph, records.len());
        tracing::info!(
            records = summary.records,
            nodes = summary.nodes,
            edges = summary.edges,
            dangling = summary.dangling_edges,
            "Flowchart graph built"
        );
        graph
    }

    fn scan(&self, records: &[Record], graph: &mut FlowGraph) {
        let mut ctx = ScanContext { graph, records };
        for record in records {
            let kind = record.kind();
            tracing::debug!(
                "Extracting {} {}/{}",
                kind,
                record.namespace(),
                record.name()
            );
            self.registry.rule_for(&kind).extract(record, &mut ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionRule;
    use crate::graph::{Node, NodeId, NodeStyle};
    use serde_json::json;

    struct ConfigMapRule;

    impl ExtractionRule for ConfigMapRule {
        fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
            let id = NodeId::resource("ConfigMap", &record.namespace(), &record.name());
            ctx.graph
                .add_node(Node::new(id, "custom", NodeStyle::resource("ConfigMap")));
        }
    }

    #[test]
    fn test_custom_rule_extends_registry() {
        let mut engine = FlowchartEngine::new();
        engine
            .registry_mut()
            .register("ConfigMap", Box::new(ConfigMapRule));

        let graph = engine.run(&[Record::new(json!({
            "kind": "ConfigMap",
            "metadata": {"name": "settings"}
        }))]);
        assert_eq!(graph.nodes()[0].label, "custom");
    }

    #[test]
    fn test_generic_only_registry() {
        let engine = FlowchartEngine::with_registry(RuleRegistry::empty());
        let graph = engine.run(&[Record::new(json!({
            "kind": "SealedSecret",
            "metadata": {"name": "s"}
        }))]);
        assert!(graph.edges().is_empty());
        assert!(!engine.registry().contains("SealedSecret"));
    }

    #[test]
    fn test_summary_counts() {
        let engine = FlowchartEngine::new();
        let records = vec![Record::new(json!({
            "kind": "SealedSecret",
            "metadata": {"name": "api-key"}
        }))];
        let graph = engine.run(&records);
        let summary = RunSummary::of(&graph, records.len());
        assert_eq!(
            summary,
            RunSummary {
                records: 1,
                nodes: 1,
                edges: 1,
                resolved_edges: 0,
                dangling_edges: 1,
            }
        );
    }
}
