//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{
    defaults, paths,
    schema::{Config, OutputFormat},
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const RANKDIRS: &[&str] = &["TB", "LR", "BT", "RL"];

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Explicit config file (`--config`)
    /// 3. Root config
    /// 4. Built-in defaults
    ///
    /// A missing root config is not an error; a missing explicit file is.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut config = Self::load_defaults();

        let root_path = paths::root_config_path();
        if root_path.exists() {
            let root_config = Self::load_file(&root_path)?;
            config = Self::merge_config(config, root_config);
        }

        if let Some(path) = explicit {
            let explicit_config = Self::load_file(path)?;
            config = Self::merge_config(config, explicit_config);
        }

        config = Self::apply_env_overrides(config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(config: &Config) -> Result<()> {
        if !RANKDIRS.contains(&config.graphviz.rankdir.as_str()) {
            return Err(anyhow::anyhow!(
                "graphviz.rankdir must be one of {}, got {}",
                RANKDIRS.join(", "),
                config.graphviz.rankdir
            ));
        }

        if config.graphviz.dpi == 0 {
            return Err(anyhow::anyhow!("graphviz.dpi must be greater than 0"));
        }

        for (kind, color) in &config.palette {
            csscolorparser::parse(color).map_err(|e| {
                anyhow::anyhow!("Invalid palette colour for {}: {} ({})", kind, color, e)
            })?;
        }

        if config.output.base_name.trim().is_empty() {
            return Err(anyhow::anyhow!("output.baseName must not be empty"));
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Merge two configurations, with `other` taking precedence
    ///
    /// Palette entries are combined; every other section is taken from `other`.
    fn merge_config(base: Config, other: Config) -> Config {
        let mut palette = base.palette;
        palette.extend(other.palette);

        Config {
            output: other.output,
            graphviz: other.graphviz,
            palette,
            dangling_edges: other.dangling_edges,
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // K8SFLOWGEN_FORMAT override
        if let Ok(format) = std::env::var("K8SFLOWGEN_FORMAT") {
            match format.parse::<OutputFormat>() {
                Ok(format) => config.output.format = format,
                Err(e) => tracing::warn!("Ignoring K8SFLOWGEN_FORMAT: {}", e),
            }
        }

        // K8SFLOWGEN_GRAPHVIZ_BINARY override
        if let Ok(binary) = std::env::var("K8SFLOWGEN_GRAPHVIZ_BINARY") {
            config.graphviz.binary = binary;
        }

        // K8SFLOWGEN_ENGINE override
        if let Ok(engine) = std::env::var("K8SFLOWGEN_ENGINE") {
            config.graphviz.engine = engine;
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
