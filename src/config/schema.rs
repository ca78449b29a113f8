//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Output artifact settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Graphviz invocation and graph attributes
    #[serde(default)]
    pub graphviz: GraphvizConfig,

    /// Fill colour overrides keyed by resource kind (CSS colour syntax)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub palette: BTreeMap<String, String>,

    /// What to do with edges whose endpoint was never drawn
    #[serde(default)]
    pub dangling_edges: DanglingEdgePolicy,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Artifact format
    #[serde(default)]
    pub format: OutputFormat,

    /// Output path without extension
    #[serde(default = "default_base_name")]
    pub base_name: String,
}

/// Graphviz configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphvizConfig {
    /// Graphviz executable used for pdf/png/svg output
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Layout engine passed as `-K`
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Graph direction: TB, LR, BT or RL
    #[serde(default = "default_rankdir")]
    pub rankdir: String,

    /// Maximum drawing size in inches, `"width,height"`
    #[serde(default = "default_size")]
    pub size: String,

    #[serde(default = "default_dpi")]
    pub dpi: u32,

    #[serde(default = "default_font_name")]
    pub font_name: String,
}

/// Artifact formats
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
    Svg,
    /// Graphviz source, written without invoking Graphviz
    Dot,
    /// Node/edge document, written without invoking Graphviz
    Json,
}

impl OutputFormat {
    /// File extension, also the Graphviz `-T` value
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "dot",
            OutputFormat::Json => "json",
        }
    }

    /// True if producing this format requires running Graphviz
    pub fn needs_graphviz(&self) -> bool {
        matches!(self, OutputFormat::Pdf | OutputFormat::Png | OutputFormat::Svg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Dangling edge handling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DanglingEdgePolicy {
    /// Keep the edge; Graphviz draws an implicit node labelled with the id
    #[default]
    Stub,
    /// Drop the edge
    Skip,
}

// Default value functions
fn default_base_name() -> String {
    "k8s_flowchart".to_string()
}

fn default_binary() -> String {
    "dot".to_string()
}

fn default_engine() -> String {
    "dot".to_string()
}

fn default_rankdir() -> String {
    "LR".to_string()
}

fn default_size() -> String {
    "40,40".to_string()
}

fn default_dpi() -> u32 {
    300
}

fn default_font_name() -> String {
    "Helvetica".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            base_name: default_base_name(),
        }
    }
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            engine: default_engine(),
            rankdir: default_rankdir(),
            size: default_size(),
            dpi: default_dpi(),
            font_name: default_font_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.output.format, OutputFormat::Pdf);
        assert_eq!(config.output.base_name, "k8s_flowchart");
        assert_eq!(config.graphviz.rankdir, "LR");
        assert_eq!(config.dangling_edges, DanglingEdgePolicy::Stub);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("baseName"));
        assert!(yaml.contains("danglingEdges: stub"));
        assert!(!yaml.contains("palette"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r##"
output:
  format: svg
graphviz:
  rankdir: TB
palette:
  Deployment: "#336699"
danglingEdges: skip
"##;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Svg);
        assert_eq!(config.output.base_name, "k8s_flowchart");
        assert_eq!(config.graphviz.rankdir, "TB");
        assert_eq!(config.graphviz.dpi, 300);
        assert_eq!(config.palette.get("Deployment").map(String::as_str), Some("#336699"));
        assert_eq!(config.dangling_edges, DanglingEdgePolicy::Skip);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("PNG".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("gv".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert!("gif".parse::<OutputFormat>().is_err());
        assert!(OutputFormat::Pdf.needs_graphviz());
        assert!(!OutputFormat::Json.needs_graphviz());
    }
}
