//! Flowchart output
//!
//! The graph is always lowered to DOT first. `dot` and `json` artifacts are
//! written directly; every other format is produced by piping the DOT text
//! through a [`GraphvizRunner`].

pub mod dot;
pub mod graphviz;
pub mod json;

pub use dot::{DotOptions, to_dot};
pub use graphviz::{CommandRunner, GraphvizRunner};
pub use json::{GraphDocument, to_json};

use crate::config::{Config, OutputFormat};
use crate::graph::FlowGraph;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to run Graphviz binary '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Graphviz exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `<base>.<extension>` for the configured format
pub fn artifact_path(base: &Path, format: OutputFormat) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Produce the artifact bytes for `config.output.format`
pub fn render_bytes(
    graph: &FlowGraph,
    config: &Config,
    runner: &dyn GraphvizRunner,
) -> Result<Vec<u8>, RenderError> {
    let format = config.output.format;
    if format == OutputFormat::Json {
        return Ok(to_json(graph)?.into_bytes());
    }

    let source = to_dot(graph, &DotOptions::from_config(config));
    if format.needs_graphviz() {
        runner.render(&source, &config.graphviz.engine, format.extension())
    } else {
        Ok(source.into_bytes())
    }
}

/// Render `graph` and write it next to `base`, returning the written path
pub fn write_artifact(
    graph: &FlowGraph,
    config: &Config,
    base: &Path,
    runner: &dyn GraphvizRunner,
) -> Result<PathBuf, RenderError> {
    let path = artifact_path(base, config.output.format);
    let bytes = render_bytes(graph, config, runner)?;

    let io_error = |source: std::io::Error| RenderError::Io {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(&path, bytes).map_err(io_error)?;

    tracing::info!("Wrote {} ({})", path.display(), config.output.format);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::graphviz::MockGraphvizRunner;
    use super::*;
    use crate::graph::{Node, NodeId, NodeStyle};
    use tempfile::TempDir;

    fn sample_graph() -> FlowGraph {
        let mut graph = FlowGraph::new();
        graph.add_node(Node::new(
            NodeId::from("Deployment_default_web"),
            "Deployment\nweb",
            NodeStyle::resource("Deployment"),
        ));
        graph
    }

    fn config_for(format: OutputFormat) -> Config {
        let mut config = Config::default();
        config.output.format = format;
        config
    }

    #[test]
    fn test_artifact_path_appends_extension() {
        assert_eq!(
            artifact_path(Path::new("out/k8s_flowchart"), OutputFormat::Pdf),
            PathBuf::from("out/k8s_flowchart.pdf")
        );
        assert_eq!(
            artifact_path(Path::new("chart.v1"), OutputFormat::Svg),
            PathBuf::from("chart.v1.svg")
        );
    }

    #[test]
    fn test_pdf_goes_through_runner() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockGraphvizRunner::new();
        runner
            .expect_render()
            .times(1)
            .returning(|dot, engine, format| {
                assert!(dot.starts_with("// Kubernetes Resource Flowchart"));
                assert!(dot.contains("\"Deployment_default_web\""));
                assert_eq!(engine, "dot");
                assert_eq!(format, "pdf");
                Ok(b"%PDF-1.4".to_vec())
            });

        let config = config_for(OutputFormat::Pdf);
        let path =
            write_artifact(&sample_graph(), &config, &temp.path().join("chart"), &runner).unwrap();

        assert_eq!(path, temp.path().join("chart.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_dot_and_json_skip_runner() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockGraphvizRunner::new();
        runner.expect_render().never();

        let dot_path = write_artifact(
            &sample_graph(),
            &config_for(OutputFormat::Dot),
            &temp.path().join("chart"),
            &runner,
        )
        .unwrap();
        let text = fs::read_to_string(dot_path).unwrap();
        assert!(text.contains("digraph {"));

        let json_path = write_artifact(
            &sample_graph(),
            &config_for(OutputFormat::Json),
            &temp.path().join("nested/dir/chart"),
            &runner,
        )
        .unwrap();
        assert!(json_path.ends_with("nested/dir/chart.json"));
        assert!(fs::read_to_string(json_path).unwrap().contains("Deployment_default_web"));
    }

    #[test]
    fn test_runner_failure_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockGraphvizRunner::new();
        runner.expect_render().returning(|_, _, _| {
            Err(RenderError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "syntax error in line 3".to_string(),
            })
        });

        let config = config_for(OutputFormat::Png);
        let err = write_artifact(&sample_graph(), &config, &temp.path().join("chart"), &runner)
            .unwrap_err();

        assert!(err.to_string().contains("syntax error"));
        assert!(!temp.path().join("chart.png").exists());
    }
}
