//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::{ConfigLoader, OutputFormat, paths};
use crate::extract::FlowchartEngine;
use crate::manifest;
use crate::render::{self, CommandRunner, GraphvizRunner};

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSubcommand {
    /// Show configuration file path
    Path,
    /// Print the effective configuration as YAML
    Show,
    /// Validate configuration
    Validate,
    /// Write the default configuration to the config file path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Handle configuration subcommands
///
/// `explicit` is the `--config` file, layered over the user config file.
pub fn handle_config_command(cmd: ConfigSubcommand, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Path => {
            let config_path = paths::root_config_path();
            println!("{}", config_path.display());
        }
        ConfigSubcommand::Show => {
            let config = ConfigLoader::load(explicit).context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Validate => {
            ConfigLoader::load(explicit).context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
        ConfigSubcommand::Init { force } => {
            let config_path = paths::root_config_path();
            if config_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            ConfigLoader::save_root(&ConfigLoader::load_defaults())
                .context("Failed to save configuration")?;
            println!("Configuration written to {}", config_path.display());
        }
    }

    Ok(())
}

/// Inputs for a flowchart generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Manifest file to read
    pub file: PathBuf,
    /// Output path without extension; falls back to `output.baseName`
    pub output: Option<PathBuf>,
    /// Overrides `output.format`
    pub format: Option<OutputFormat>,
    /// Extra config file layered over the user config file
    pub config: Option<PathBuf>,
}

/// Load, build and render a flowchart using the configured Graphviz binary
pub fn generate(options: &GenerateOptions) -> Result<PathBuf> {
    let mut config =
        ConfigLoader::load(options.config.as_deref()).context("Failed to load configuration")?;
    if let Some(format) = options.format {
        config.output.format = format;
    }
    let runner = CommandRunner::new(config.graphviz.binary.clone());
    generate_with(options, &config, &runner)
}

/// [`generate`] with a resolved config and an explicit Graphviz runner
pub fn generate_with(
    options: &GenerateOptions,
    config: &crate::config::Config,
    runner: &dyn GraphvizRunner,
) -> Result<PathBuf> {
    let records = manifest::load_manifests(&options.file)?;
    tracing::debug!("Loaded {} records from {}", records.len(), options.file.display());

    let graph = FlowchartEngine::new().run(&records);

    let base = options
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.base_name));

    let path = render::write_artifact(&graph, config, &base, runner)
        .with_context(|| format!("Failed to render {} output", config.output.format))?;
    Ok(path)
}
