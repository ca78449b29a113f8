//! Deployment rule
//!
//! Walks the pod template: containers and everything hanging off them
//! (ports, resources, mounts, env), the selector match-labels, and the
//! volumes backed by claims, ConfigMaps or Secrets.

use super::{ExtractionRule, ScanContext, add_resource_node};
use crate::graph::{
    Edge, FlowGraph, Node, NodeId, NodeStyle, PVC_TAG, PairKind, Relation, SubKind,
};
use crate::manifest::{Record, value};
use crate::models::ResourceKind;
use serde_json::Value;

const CONFIG_MAP_KIND: &str = "ConfigMap";
const CLAIM_KIND: &str = "PersistentVolumeClaim";

const CONTAINERS: &[&str] = &["spec", "template", "spec", "containers"];
const VOLUMES: &[&str] = &["spec", "template", "spec", "volumes"];
const MATCH_LABELS: &[&str] = &["spec", "selector", "matchLabels"];

#[derive(Debug, Default, Clone, Copy)]
pub struct DeploymentRule;

impl ExtractionRule for DeploymentRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let id = add_resource_node(record, ctx.graph);
        ctx.graph
            .index_record(ResourceKind::Deployment, id.clone(), record.clone());

        let namespace = record.namespace();
        let doc = record.value();

        for (idx, container) in value::items(doc, CONTAINERS).iter().enumerate() {
            extract_container(ctx.graph, &id, &namespace, idx, container);
        }

        for (key, label_value) in value::entries(doc, MATCH_LABELS) {
            let rendered = value::render(label_value);
            let label_id = NodeId::pair(PairKind::Label, &namespace, key, &rendered);
            ctx.graph.add_node(Node::new(
                label_id.clone(),
                format!("Label\n{}={}", key, rendered),
                NodeStyle::Label,
            ));
            ctx.graph
                .add_edge(Edge::new(id.clone(), label_id, Relation::Selects).dashed());
        }

        for volume in value::items(doc, VOLUMES) {
            extract_volume(ctx, &id, &namespace, volume);
        }
    }
}

fn extract_container(
    graph: &mut FlowGraph,
    deployment_id: &NodeId,
    namespace: &str,
    idx: usize,
    container: &Value,
) {
    let fallback_name = format!("container-{}", idx);
    let name = value::text_or(container, &["name"], &fallback_name);
    let image = value::text_or(container, &["image"], "unknown");

    let container_id = deployment_id.child(SubKind::Container, Some(name.as_ref()));
    graph.add_node(Node::new(
        container_id.clone(),
        format!("Container: {}\nImage: {}", name, image),
        NodeStyle::Container,
    ));
    graph.add_edge(Edge::new(
        deployment_id.clone(),
        container_id.clone(),
        Relation::Runs,
    ));

    let ports = value::items(container, &["ports"]);
    if !ports.is_empty() {
        let port_info = ports
            .iter()
            .map(|port| {
                format!(
                    "{}/{}",
                    value::text_or(port, &["containerPort"], "unknown"),
                    value::text_or(port, &["protocol"], "TCP")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let ports_id = container_id.child(SubKind::Ports, None);
        graph.add_node(Node::new(
            ports_id.clone(),
            format!("Ports:\n{}", port_info),
            NodeStyle::Ports,
        ));
        graph.add_edge(Edge::new(container_id.clone(), ports_id, Relation::Exposes));
    }

    let quantity = |section: &str, resource: &str| {
        value::text_or(container, &["resources", section, resource], "undefined").into_owned()
    };
    let resources_id = container_id.child(SubKind::Resources, None);
    graph.add_node(Node::new(
        resources_id.clone(),
        format!(
            "Resources\nRequests: {} CPU, {} Memory\nLimits: {} CPU, {} Memory",
            quantity("requests", "cpu"),
            quantity("requests", "memory"),
            quantity("limits", "cpu"),
            quantity("limits", "memory"),
        ),
        NodeStyle::Resources,
    ));
    graph.add_edge(Edge::new(
        container_id.clone(),
        resources_id,
        Relation::Has,
    ));

    for mount in value::items(container, &["volumeMounts"]) {
        let mount_name = value::text_or(mount, &["name"], "unnamed-mount");
        let mount_path = value::text_or(mount, &["mountPath"], "unknown-path");
        let mount_id = container_id.child(SubKind::Mount, Some(mount_name.as_ref()));
        graph.add_node(Node::new(
            mount_id.clone(),
            format!("Mount\n{}\n{}", mount_name, mount_path),
            NodeStyle::Mount,
        ));
        graph.add_edge(Edge::new(container_id.clone(), mount_id, Relation::Mounts));
    }

    for env in value::items(container, &["env"]) {
        extract_env(graph, &container_id, namespace, env);
    }
}

/// One env var: a literal, a ConfigMap/Secret key reference, or some other source
///
/// Referenced ConfigMaps and Secrets are addressed in the container's own
/// namespace whether or not they exist in the input.
fn extract_env(graph: &mut FlowGraph, container_id: &NodeId, namespace: &str, env: &Value) {
    let env_name = value::text_or(env, &["name"], "unnamed-env");
    let env_id = container_id.child(SubKind::Env, Some(env_name.as_ref()));

    let label = if value::has_key(env, "value") {
        let literal = env.get("value").map(value::render).unwrap_or_default();
        format!("Env\n{}={}", env_name, literal)
    } else if let Some(value_from) = env.get("valueFrom") {
        if value::has_key(value_from, "configMapKeyRef") {
            let cm_name = value::text_or(value_from, &["configMapKeyRef", "name"], "unnamed-cm");
            let cm_key = value::text_or(value_from, &["configMapKeyRef", "key"], "unnamed-key");
            graph.add_edge(
                Edge::new(
                    env_id.clone(),
                    NodeId::resource(CONFIG_MAP_KIND, namespace, &cm_name),
                    Relation::References,
                )
                .dotted(),
            );
            format!("Env\n{}\nfrom ConfigMap\n{}.{}", env_name, cm_name, cm_key)
        } else if value::has_key(value_from, "secretKeyRef") {
            let secret_name =
                value::text_or(value_from, &["secretKeyRef", "name"], "unnamed-secret");
            let secret_key = value::text_or(value_from, &["secretKeyRef", "key"], "unnamed-key");
            graph.add_edge(
                Edge::new(
                    env_id.clone(),
                    NodeId::resource(ResourceKind::Secret.as_str(), namespace, &secret_name),
                    Relation::References,
                )
                .dotted(),
            );
            format!("Env\n{}\nfrom Secret\n{}.{}", env_name, secret_name, secret_key)
        } else {
            format!("Env\n{}\nfrom Other Source", env_name)
        }
    } else {
        format!("Env\n{}", env_name)
    };

    graph.add_node(Node::new(env_id.clone(), label, NodeStyle::Env));
    graph.add_edge(Edge::new(container_id.clone(), env_id, Relation::Env).dashed());
}

fn extract_volume(
    ctx: &mut ScanContext<'_>,
    deployment_id: &NodeId,
    namespace: &str,
    volume: &Value,
) {
    let (target_id, label, kind) = if value::has_key(volume, "persistentVolumeClaim") {
        let claim = value::text_or(volume, &["persistentVolumeClaim", "claimName"], "unnamed-pvc");
        let size = claim_size(ctx.records, &claim);
        (
            NodeId::resource(PVC_TAG, namespace, &claim),
            format!("PVC\n{}\nSize: {}", claim, size),
            CLAIM_KIND,
        )
    } else if value::has_key(volume, "configMap") {
        let cm_name = value::text_or(volume, &["configMap", "name"], "unnamed-configmap");
        (
            NodeId::resource(CONFIG_MAP_KIND, namespace, &cm_name),
            format!("ConfigMap\n{}", cm_name),
            CONFIG_MAP_KIND,
        )
    } else if value::has_key(volume, "secret") {
        let secret_name = value::text_or(volume, &["secret", "secretName"], "unnamed-secret");
        (
            NodeId::resource(ResourceKind::Secret.as_str(), namespace, &secret_name),
            format!("Secret\n{}", secret_name),
            ResourceKind::Secret.as_str(),
        )
    } else {
        return;
    };

    ctx.graph
        .add_node(Node::new(target_id.clone(), label, NodeStyle::resource(kind)));
    ctx.graph
        .add_edge(Edge::new(deployment_id.clone(), target_id, Relation::Uses));
}

/// Requested storage of the first claim named `claim` anywhere in the input
///
/// Claims are matched by name alone, in any namespace.
fn claim_size(records: &[Record], claim: &str) -> String {
    records
        .iter()
        .find(|record| {
            record.kind() == CLAIM_KIND && record.declared_name().as_deref() == Some(claim)
        })
        .map(|record| {
            value::text_or(
                record.value(),
                &["spec", "resources", "requests", "storage"],
                "unknown",
            )
            .into_owned()
        })
        .unwrap_or_else(|| "unknown".to_string())
}
