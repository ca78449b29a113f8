//! Graphviz subprocess

use super::RenderError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Turns DOT text into a rendered artifact
#[cfg_attr(test, mockall::automock)]
pub trait GraphvizRunner {
    /// Render `dot` with layout `engine` into `format` (a Graphviz `-T` value)
    fn render(&self, dot: &str, engine: &str, format: &str) -> Result<Vec<u8>, RenderError>;
}

/// Runs the Graphviz binary, feeding DOT on stdin and collecting stdout
#[derive(Debug, Clone)]
pub struct CommandRunner {
    binary: String,
}

impl CommandRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl GraphvizRunner for CommandRunner {
    fn render(&self, dot: &str, engine: &str, format: &str) -> Result<Vec<u8>, RenderError> {
        tracing::debug!("Running {} -K{} -T{}", self.binary, engine, format);

        let spawn_error = |source: std::io::Error| RenderError::Spawn {
            binary: self.binary.clone(),
            source,
        };

        let mut child = Command::new(&self.binary)
            .arg(format!("-K{}", engine))
            .arg(format!("-T{}", format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Written from a separate thread so a large stdout cannot block stdin
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| spawn_error(std::io::Error::other("stdin was not captured")))?;
        let input = dot.to_owned();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(spawn_error)?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match writer.join() {
            Ok(result) => result.map_err(spawn_error)?,
            Err(_) => {
                return Err(spawn_error(std::io::Error::other("stdin writer thread panicked")));
            }
        }

        Ok(output.stdout)
    }
}
