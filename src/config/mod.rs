//! Configuration system for k8sflowgen
//!
//! Layered YAML configuration: built-in defaults, the user config file, an
//! explicit `--config` file, then environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use defaults::{DEFAULT_KIND_COLOR, KIND_COLORS, palette_with};
pub use loader::ConfigLoader;
pub use schema::{Config, DanglingEdgePolicy, GraphvizConfig, OutputConfig, OutputFormat};
