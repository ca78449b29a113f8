//! k8sflowgen - generate relationship flowcharts from Kubernetes manifests
//!
//! Reads a multi-document YAML file, links Deployments, Services, Ingresses,
//! secrets and their references, and renders the result with Graphviz.

use anyhow::Result;
use clap::{Parser, Subcommand};
use k8sflowgen::cli::{self, ConfigSubcommand, GenerateOptions};
use k8sflowgen::config::OutputFormat;
use std::path::PathBuf;

/// Generate a flowchart from Kubernetes manifests
#[derive(Parser, Debug)]
#[command(name = "k8sflowgen", version)]
#[command(about = "Generate relationship flowcharts from Kubernetes manifests", long_about = None)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    /// Manifest file (multi-document YAML)
    #[arg(short = 'f', long = "file", required = true)]
    file: Option<PathBuf>,

    /// Output path without extension
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output format (overrides config and K8SFLOWGEN_FORMAT)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Additional configuration file
    #[arg(long = "config", value_name = "FILE", global = true)]
    config_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.debug);
    tracing::debug!("Debug logging enabled");

    if let Some(Command::Config { subcommand }) = args.command {
        return cli::handle_config_command(subcommand, args.config_file.as_deref());
    }

    // clap enforces -f when no subcommand is given
    let Some(file) = args.file else {
        anyhow::bail!("a manifest file is required (-f <FILE>)");
    };

    let options = GenerateOptions {
        file,
        output: args.output,
        format: args.format,
        config: args.config_file,
    };

    let path = cli::generate(&options)?;
    println!("Flowchart generated: {}", path.display());
    Ok(())
}
