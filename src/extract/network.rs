//! Service, Ingress and HTTPProxy rules

use super::{ExtractionRule, ScanContext, add_resource_node, add_resource_node_with_label};
use crate::graph::{Edge, Node, NodeId, NodeStyle, PairKind, Relation};
use crate::manifest::{Record, value};
use crate::models::ResourceKind;
use std::borrow::Cow;

/// Service: port summary in the label, one diamond per selector entry
///
/// Linking to the Deployments it selects happens in the resolution pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceRule;

impl ExtractionRule for ServiceRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let doc = record.value();
        let port_info = value::items(doc, &["spec", "ports"])
            .iter()
            .map(|port| {
                format!(
                    "{}/{}",
                    value::text_or(port, &["port"], "unknown"),
                    value::text_or(port, &["protocol"], "TCP")
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        let id = add_resource_node_with_label(record, ctx.graph, |kind, name| {
            format!("{}\n{}\nPorts: {}", kind, name, port_info)
        });
        ctx.graph
            .index_record(ResourceKind::Service, id.clone(), record.clone());

        let namespace = record.namespace();
        for (key, selector_value) in value::entries(doc, &["spec", "selector"]) {
            let rendered = value::render(selector_value);
            let selector_id = NodeId::pair(PairKind::Selector, &namespace, key, &rendered);
            ctx.graph.add_node(Node::new(
                selector_id.clone(),
                format!("Selector\n{}={}", key, rendered),
                NodeStyle::Selector,
            ));
            ctx.graph
                .add_edge(Edge::new(id.clone(), selector_id, Relation::Unlabeled).dashed());
        }
    }
}

/// Ingress: every path backend routes to a Service, every TLS entry uses a Secret
#[derive(Debug, Default, Clone, Copy)]
pub struct IngressRule;

impl IngressRule {
    /// Backend service name: `serviceName` (extensions/v1beta1) or `service.name` (networking/v1)
    fn backend_service(path: &serde_json::Value) -> Option<Cow<'_, str>> {
        value::non_empty_text(path, &["backend", "serviceName"])
            .or_else(|| value::non_empty_text(path, &["backend", "service", "name"]))
    }
}

impl ExtractionRule for IngressRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let id = add_resource_node(record, ctx.graph);
        ctx.graph
            .index_record(ResourceKind::Ingress, id.clone(), record.clone());

        let namespace = record.namespace();
        for rule in value::items(record.value(), &["spec", "rules"]) {
            for path in value::items(rule, &["http", "paths"]) {
                if let Some(service_name) = Self::backend_service(path) {
                    let service_id = NodeId::resource(
                        ResourceKind::Service.as_str(),
                        &namespace,
                        &service_name,
                    );
                    ctx.graph
                        .add_edge(Edge::new(id.clone(), service_id, Relation::RoutesTo));
                }
            }
        }

        for tls in value::items(record.value(), &["spec", "tls"]) {
            if let Some(secret_name) = value::non_empty_text(tls, &["secretName"]) {
                let secret_id =
                    NodeId::resource(ResourceKind::Secret.as_str(), &namespace, &secret_name);
                ctx.graph
                    .add_edge(Edge::new(id.clone(), secret_id, Relation::UsesTls));
            }
        }
    }
}

/// Contour HTTPProxy: route services and the virtual host TLS secret
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpProxyRule;

impl ExtractionRule for HttpProxyRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let id = add_resource_node(record, ctx.graph);
        ctx.graph
            .index_record(ResourceKind::HTTPProxy, id.clone(), record.clone());

        let namespace = record.namespace();
        for route in value::items(record.value(), &["spec", "routes"]) {
            for service in value::items(route, &["services"]) {
                if let Some(service_name) = value::non_empty_text(service, &["name"]) {
                    let service_id = NodeId::resource(
                        ResourceKind::Service.as_str(),
                        &namespace,
                        &service_name,
                    );
                    ctx.graph
                        .add_edge(Edge::new(id.clone(), service_id, Relation::RoutesTo));
                }
            }
        }

        if let Some(secret_name) =
            value::non_empty_text(record.value(), &["spec", "virtualhost", "tls", "secretName"])
        {
            let secret_id =
                NodeId::resource(ResourceKind::Secret.as_str(), &namespace, &secret_name);
            ctx.graph.add_edge(Edge::new(id, secret_id, Relation::UsesTls));
        }
    }
}
