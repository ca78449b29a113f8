//! Cross-reference resolution
//!
//! Runs once the scan has indexed every record. A Service selects every
//! Deployment whose pod-template labels contain all of the Service's selector
//! entries. Declaration order does not matter, since both sides are read from
//! the completed indexes.

use crate::graph::{Edge, FlowGraph, NodeId, Phase, Relation};
use crate::manifest::{Record, value};
use crate::models::ResourceKind;
use serde_json::{Map, Value};

const SELECTOR: &[&str] = &["spec", "selector"];
const POD_LABELS: &[&str] = &["spec", "template", "metadata", "labels"];

/// Link Services to the Deployments they select
///
/// Every matching pair gets a resolved `selects` edge. An empty selector
/// matches every Deployment. Returns the number of edges added.
pub fn resolve_service_selectors(graph: &mut FlowGraph) -> usize {
    if graph.phase() != Phase::Resolving {
        graph.begin_resolution();
    }

    let empty = Map::new();
    let mut links: Vec<(NodeId, NodeId)> = Vec::new();

    for (service_id, service) in graph.all_of_kind(ResourceKind::Service) {
        let selector = mapping(service, SELECTOR).unwrap_or(&empty);
        if selector.is_empty() {
            tracing::warn!(
                "Service {} has an empty selector and will match every Deployment",
                service_id
            );
        }

        for (deployment_id, deployment) in graph.all_of_kind(ResourceKind::Deployment) {
            let labels = mapping(deployment, POD_LABELS).unwrap_or(&empty);
            if selector_matches(selector, labels) {
                tracing::debug!("{} selects {}", service_id, deployment_id);
                links.push((service_id.clone(), deployment_id.clone()));
            }
        }
    }

    let added = links.len();
    for (service_id, deployment_id) in links {
        graph.add_edge(Edge::resolved(service_id, deployment_id, Relation::Selects));
    }
    added
}

/// True when every selector entry is present with an equal value in `labels`
pub fn selector_matches(selector: &Map<String, Value>, labels: &Map<String, Value>) -> bool {
    selector
        .iter()
        .all(|(key, expected)| labels.get(key) == Some(expected))
}

fn mapping<'a>(record: &'a Record, path: &[&str]) -> Option<&'a Map<String, Value>> {
    value::lookup(record.value(), path).and_then(Value::as_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_selector_is_subset_test() {
        let labels = map(json!({"app": "x", "tier": "web"}));
        assert!(selector_matches(&map(json!({"app": "x"})), &labels));
        assert!(selector_matches(&map(json!({"app": "x", "tier": "web"})), &labels));
        assert!(!selector_matches(&map(json!({"app": "y"})), &labels));
        assert!(!selector_matches(&map(json!({"release": "x"})), &labels));
    }

    #[test]
    fn test_empty_selector_matches_anything() {
        assert!(selector_matches(&Map::new(), &Map::new()));
        assert!(selector_matches(&Map::new(), &map(json!({"app": "x"}))));
    }

    #[test]
    fn test_resolution_links_all_matches() {
        let mut graph = FlowGraph::new();
        let deployment = |app: &str| {
            Record::new(json!({"spec": {"template": {"metadata": {"labels": {"app": app}}}}}))
        };
        graph.index_record(ResourceKind::Deployment, NodeId::from("d1"), deployment("x"));
        graph.index_record(ResourceKind::Deployment, NodeId::from("d2"), deployment("y"));
        graph.index_record(ResourceKind::Deployment, NodeId::from("d3"), deployment("x"));
        graph.index_record(
            ResourceKind::Service,
            NodeId::from("s1"),
            Record::new(json!({"spec": {"selector": {"app": "x"}}})),
        );

        let added = resolve_service_selectors(&mut graph);
        assert_eq!(added, 2);
        assert_eq!(graph.phase(), Phase::Resolving);

        let targets: Vec<&str> = graph.edges().iter().map(|e| e.to.as_str()).collect();
        assert_eq!(targets, vec!["d1", "d3"]);
        assert!(graph.edges().iter().all(|e| e.resolved));
    }

    #[test]
    fn test_deployment_without_labels_only_matches_empty_selector() {
        let mut graph = FlowGraph::new();
        graph.index_record(ResourceKind::Deployment, NodeId::from("d"), Record::new(json!({})));
        graph.index_record(
            ResourceKind::Service,
            NodeId::from("picky"),
            Record::new(json!({"spec": {"selector": {"app": "x"}}})),
        );
        graph.index_record(ResourceKind::Service, NodeId::from("open"), Record::new(json!({})));

        resolve_service_selectors(&mut graph);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].from, "open");
    }
}
