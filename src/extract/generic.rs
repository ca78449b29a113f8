//! Fallback rule for kinds without dedicated handling

use super::{ExtractionRule, ScanContext, add_resource_node};
use crate::manifest::Record;

/// Draws one `<kind>\n<name>` node and nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericRule;

impl ExtractionRule for GenericRule {
    fn extract(&self, record: &Record, ctx: &mut ScanContext<'_>) {
        let id = add_resource_node(record, ctx.graph);
        tracing::debug!("No dedicated rule for {}, drew plain node", id);
    }
}
