//! Graph accumulator and rule registry tests
//!
//! Tests for node deduplication, phase handling, dangling edge reporting and
//! extending the engine with additional rules.

use k8sflowgen::manifest::value;
use k8sflowgen::{
    Edge, ExtractionRule, FlowGraph, FlowchartEngine, Node, NodeId, NodeStyle, Phase, Record,
    Relation, ResourceKind, RuleRegistry, RunSummary, ScanContext, parse_manifests,
};
use serde_json::json;

#[test]
fn test_graph_creation() {
    let graph = FlowGraph::new();
    assert!(graph.nodes().is_empty());
    assert!(graph.edges().is_empty());
    assert_eq!(graph.phase(), Phase::Scanning);
}

#[test]
fn test_duplicate_node_keeps_position_and_edges() {
    let mut graph = FlowGraph::new();
    let web = NodeId::resource("Deployment", "default", "web");
    let db = NodeId::resource("Deployment", "default", "db");

    graph.add_node(Node::new(web.clone(), "first", NodeStyle::resource("Deployment")));
    graph.add_node(Node::new(db.clone(), "db", NodeStyle::resource("Deployment")));
    graph.add_edge(Edge::new(web.clone(), db.clone(), Relation::Uses));
    graph.add_node(Node::new(web.clone(), "second", NodeStyle::resource("Deployment")));

    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.nodes()[0].id, web);
    assert_eq!(graph.nodes()[0].label, "second");
    assert_eq!(graph.edges().len(), 1);
}

#[test]
fn test_duplicate_edges_are_kept() {
    let mut graph = FlowGraph::new();
    let a = NodeId::from("a");
    let b = NodeId::from("b");
    graph.add_edge(Edge::new(a.clone(), b.clone(), Relation::Uses));
    graph.add_edge(Edge::new(a, b, Relation::Uses));
    assert_eq!(graph.edges().len(), 2);
}

#[test]
fn test_index_is_read_only_after_scan() {
    let mut graph = FlowGraph::new();
    let record = Record::new(json!({"kind": "Secret", "metadata": {"name": "a"}}));
    graph.index_record(ResourceKind::Secret, NodeId::from("Secret_default_a"), record.clone());

    graph.begin_resolution();
    graph.index_record(ResourceKind::Secret, NodeId::from("Secret_default_b"), record);

    assert_eq!(graph.phase(), Phase::Resolving);
    assert_eq!(graph.indexed_count(ResourceKind::Secret), 1);
    let ids: Vec<&str> = graph
        .all_of_kind(ResourceKind::Secret)
        .map(|(id, _)| id.as_str())
        .collect();
    assert_eq!(ids, vec!["Secret_default_a"]);
}

#[test]
fn test_dangling_edges_reported() {
    let mut graph = FlowGraph::new();
    let a = NodeId::from("a");
    graph.add_node(Node::new(a.clone(), "a", NodeStyle::Container));
    graph.add_edge(Edge::new(a.clone(), NodeId::from("ghost"), Relation::References).dotted());
    graph.add_edge(Edge::new(a.clone(), a, Relation::Has));

    let dangling: Vec<&Edge> = graph.dangling_edges().collect();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].to, "ghost");
}

/// Draws ConfigMaps with their key count
struct ConfigMapRule;

impl ExtractionRule for ConfigMapRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let keys = value::entries(record.value(), &["data"]).count();
        let id = NodeId::resource("ConfigMap", &record.namespace(), &record.name());
        ctx.graph.add_node(Node::new(
            id,
            format!("ConfigMap\n{}\n{} keys", record.name(), keys),
            NodeStyle::resource("ConfigMap"),
        ));
    }
}

#[test]
fn test_registered_rule_extends_engine() {
    let mut registry = RuleRegistry::with_defaults();
    assert!(!registry.contains("ConfigMap"));
    assert!(registry.register("ConfigMap", Box::new(ConfigMapRule)).is_none());
    assert!(registry.contains("ConfigMap"));

    let records = parse_manifests(
        r#"
kind: ConfigMap
metadata: {name: settings}
data:
  LOG_LEVEL: debug
  PORT: "8080"
"#,
    )
    .unwrap();

    let graph = FlowchartEngine::with_registry(registry).run(&records);
    assert_eq!(graph.nodes()[0].label, "ConfigMap\nsettings\n2 keys");
}

#[test]
fn test_empty_registry_draws_everything_generically() {
    let records = parse_manifests(
        r#"
kind: Service
metadata: {name: web}
spec:
  selector: {app: web}
"#,
    )
    .unwrap();

    let graph = FlowchartEngine::with_registry(RuleRegistry::empty()).run(&records);
    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(graph.nodes()[0].label, "Service\nweb");
    assert!(graph.edges().is_empty());
}

#[test]
fn test_run_summary_counts() {
    let records = parse_manifests(
        r#"
kind: Deployment
metadata: {name: web}
spec:
  template:
    metadata:
      labels: {app: web}
---
kind: Service
metadata: {name: web}
spec:
  selector: {app: web}
---
kind: SealedSecret
metadata: {name: token}
"#,
    )
    .unwrap();

    let graph = FlowchartEngine::new().run(&records);
    let summary = RunSummary::of(&graph, records.len());

    assert_eq!(summary.records, 3);
    assert_eq!(summary.nodes, graph.nodes().len());
    assert_eq!(summary.edges, graph.edges().len());
    assert_eq!(summary.resolved_edges, 1);
    assert_eq!(summary.dangling_edges, 1);
}
