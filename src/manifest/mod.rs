//! Manifest loading
//!
//! Turns a multi-document YAML stream into an ordered sequence of untyped
//! [`Record`]s. This is the only place input errors can occur; everything
//! downstream is total over well-formed trees.

pub mod loader;
pub mod record;
pub mod value;

pub use loader::{load_manifests, parse_manifests};
pub use record::{DEFAULT_KIND, DEFAULT_NAME, DEFAULT_NAMESPACE, Record};

use std::path::PathBuf;

/// Manifest loading errors
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Manifest file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read manifest file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
