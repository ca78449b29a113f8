//! Certificate, SealedSecret and Secret rules

use super::{ExtractionRule, ScanContext, add_resource_node};
use crate::graph::{Edge, NodeId, Relation};
use crate::manifest::{Record, value};
use crate::models::ResourceKind;

/// cert-manager Certificate: `spec.secretName` is the Secret it creates
#[derive(Debug, Default, Clone, Copy)]
pub struct CertificateRule;

impl ExtractionRule for CertificateRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let id = add_resource_node(record, ctx.graph);
        ctx.graph
            .index_record(ResourceKind::Certificate, id.clone(), record.clone());

        if let Some(secret_name) = value::non_empty_text(record.value(), &["spec", "secretName"]) {
            let secret_id = NodeId::resource(
                ResourceKind::Secret.as_str(),
                &record.namespace(),
                &secret_name,
            );
            ctx.graph.add_edge(Edge::new(id, secret_id, Relation::Creates));
        }
    }
}

/// Bitnami SealedSecret
///
/// The controller writes a Secret with the SealedSecret's own name, so the
/// target id is derived from it rather than from any field in the spec.
#[derive(Debug, Default, Clone, Copy)]
pub struct SealedSecretRule;

impl ExtractionRule for SealedSecretRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let id = add_resource_node(record, ctx.graph);
        ctx.graph
            .index_record(ResourceKind::SealedSecret, id.clone(), record.clone());

        let secret_id = NodeId::resource(
            ResourceKind::Secret.as_str(),
            &record.namespace(),
            &record.name(),
        );
        ctx.graph
            .add_edge(Edge::new(id, secret_id, Relation::UnsealsTo).dashed());
    }
}

/// Plain Secret: a node, indexed for lookups
#[derive(Debug, Default, Clone, Copy)]
pub struct SecretRule;

impl ExtractionRule for SecretRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let id = add_resource_node(record, ctx.graph);
        ctx.graph
            .index_record(ResourceKind::Secret, id, record.clone());
    }
}
