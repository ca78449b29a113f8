//! Graphviz DOT text
//!
//! Nodes are written in creation order, then edges in creation order, so the
//! same graph always produces byte-identical text.

use crate::config::{self, Config, DanglingEdgePolicy};
use crate::graph::{Edge, EdgeStyle, FlowGraph, Node, NodeStyle};
use std::collections::BTreeMap;
use std::fmt::Write;

const GRAPH_COMMENT: &str = "Kubernetes Resource Flowchart";
const RESOLVED_EDGE_COLOR: &str = "#007ACC";
const RESOLVED_EDGE_PENWIDTH: &str = "2";

/// Graph-level settings for DOT output
#[derive(Debug, Clone, PartialEq)]
pub struct DotOptions {
    pub rankdir: String,
    pub size: String,
    pub dpi: u32,
    pub font_name: String,
    /// Fill colour by resource kind
    pub palette: BTreeMap<String, String>,
    pub dangling_edges: DanglingEdgePolicy,
}

impl DotOptions {
    pub fn from_config(config: &Config) -> Self {
        let overrides: BTreeMap<String, String> = config
            .palette
            .iter()
            .map(|(kind, color)| (kind.clone(), normalize_color(color)))
            .collect();

        Self {
            rankdir: config.graphviz.rankdir.clone(),
            size: config.graphviz.size.clone(),
            dpi: config.graphviz.dpi,
            font_name: config.graphviz.font_name.clone(),
            palette: config::palette_with(&overrides),
            dangling_edges: config.dangling_edges,
        }
    }

    fn kind_color(&self, kind: &str) -> &str {
        self.palette
            .get(kind)
            .map(String::as_str)
            .unwrap_or(config::DEFAULT_KIND_COLOR)
    }
}

impl Default for DotOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// CSS colour to `#RRGGBB` (or `#RRGGBBAA`), which Graphviz understands
///
/// Values that do not parse are passed through untouched.
fn normalize_color(color: &str) -> String {
    match csscolorparser::parse(color) {
        Ok(parsed) => {
            let [r, g, b, a] = parsed.to_rgba8();
            let mut hex = format!("#{:02X}{:02X}{:02X}", r, g, b);
            if a < u8::MAX {
                let _ = write!(hex, "{:02X}", a);
            }
            hex
        }
        Err(_) => color.to_string(),
    }
}

/// Render `graph` as DOT text
pub fn to_dot(graph: &FlowGraph, options: &DotOptions) -> String {
    let mut out = String::new();
    let font = &options.font_name;

    let _ = writeln!(out, "// {}", GRAPH_COMMENT);
    out.push_str("digraph {\n");
    let _ = writeln!(
        out,
        "\tgraph{}",
        attrs(&[
            ("rankdir", options.rankdir.clone()),
            ("size", options.size.clone()),
            ("dpi", options.dpi.to_string()),
            ("fontname", font.clone()),
            ("fontsize", "12".to_string()),
        ])
    );
    let _ = writeln!(
        out,
        "\tnode{}",
        attrs(&[
            ("shape", "box".to_string()),
            ("style", "rounded,filled".to_string()),
            ("fontname", font.clone()),
            ("fontsize", "12".to_string()),
            ("margin", "0.3,0.1".to_string()),
        ])
    );
    let _ = writeln!(
        out,
        "\tedge{}",
        attrs(&[("fontname", font.clone()), ("fontsize", "10".to_string())])
    );

    for node in graph.nodes() {
        let _ = writeln!(out, "\t{}{}", quote(node.id.as_str()), attrs(&node_attrs(node, options)));
    }

    for edge in graph.edges() {
        if options.dangling_edges == DanglingEdgePolicy::Skip && graph.is_dangling(edge) {
            tracing::debug!("Skipping dangling edge {} -> {}", edge.from, edge.to);
            continue;
        }
        let _ = writeln!(
            out,
            "\t{} -> {}{}",
            quote(edge.from.as_str()),
            quote(edge.to.as_str()),
            attrs(&edge_attrs(edge))
        );
    }

    out.push_str("}\n");
    out
}

fn node_attrs(node: &Node, options: &DotOptions) -> Vec<(&'static str, String)> {
    let mut attrs = vec![("label", node.label.clone())];
    let (shape, fill) = match &node.style {
        NodeStyle::Resource(kind) => (None, Some(options.kind_color(kind))),
        NodeStyle::Container => (None, Some(options.kind_color("Container"))),
        NodeStyle::Ports => (Some("note"), Some("#D9E6F2")),
        NodeStyle::Resources => (Some("note"), Some("#F0F0F0")),
        NodeStyle::Mount => (Some("folder"), Some("#F0F0F0")),
        NodeStyle::Env => (Some("plaintext"), None),
        NodeStyle::Label => (Some("ellipse"), Some("#FFFFD9")),
        NodeStyle::Selector => (Some("diamond"), Some("#D9FFFF")),
    };
    if let Some(shape) = shape {
        attrs.push(("shape", shape.to_string()));
    }
    if let Some(fill) = fill {
        attrs.push(("fillcolor", fill.to_string()));
    }
    attrs
}

fn edge_attrs(edge: &Edge) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    if let Some(label) = edge.relation.label() {
        attrs.push(("label", label.to_string()));
    }
    if edge.style != EdgeStyle::Solid {
        attrs.push(("style", edge.style.as_str().to_string()));
    }
    if edge.resolved {
        attrs.push(("color", RESOLVED_EDGE_COLOR.to_string()));
        attrs.push(("penwidth", RESOLVED_EDGE_PENWIDTH.to_string()));
    }
    attrs
}

fn attrs(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let body = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, quote(value)))
        .collect::<Vec<_>>()
        .join(" ");
    format!(" [{}]", body)
}

/// Double-quoted DOT string; line breaks become `\n` escapes
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeId, Relation};

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\nb"), r#""a\nb""#);
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote(r"C:\x"), r#""C:\\x""#);
    }

    #[test]
    fn test_normalize_color() {
        assert_eq!(normalize_color("red"), "#FF0000");
        assert_eq!(normalize_color("rgb(0, 128, 255)"), "#0080FF");
        assert_eq!(normalize_color("#abc"), "#AABBCC");
        assert_eq!(normalize_color("nonsense"), "nonsense");
    }

    #[test]
    fn test_resource_colors_from_palette() {
        let options = DotOptions::default();
        assert_eq!(options.kind_color("Deployment"), "#E6F3FF");
        assert_eq!(options.kind_color("CustomResource"), "#FFFFFF");
    }

    #[test]
    fn test_skip_dangling_edges() {
        let mut graph = FlowGraph::new();
        let a = NodeId::from("a");
        graph.add_node(Node::new(a.clone(), "a", NodeStyle::resource("Secret")));
        graph.add_edge(Edge::new(a.clone(), NodeId::from("ghost"), Relation::Uses));

        let stub = to_dot(&graph, &DotOptions::default());
        assert!(stub.contains("\"a\" -> \"ghost\" [label=\"uses\"]"));

        let options = DotOptions {
            dangling_edges: DanglingEdgePolicy::Skip,
            ..DotOptions::default()
        };
        let skipped = to_dot(&graph, &options);
        assert!(!skipped.contains("ghost"));
    }

    #[test]
    fn test_edge_attributes() {
        let from = NodeId::from("s");
        let to = NodeId::from("d");
        let resolved = Edge::resolved(from.clone(), to.clone(), Relation::Selects);
        assert_eq!(
            attrs(&edge_attrs(&resolved)),
            r##" [label="selects" color="#007ACC" penwidth="2"]"##
        );

        let unlabeled = Edge::new(from, to, Relation::Unlabeled).dashed();
        assert_eq!(attrs(&edge_attrs(&unlabeled)), r#" [style="dashed"]"#);
    }
}
