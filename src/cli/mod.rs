//! CLI command handling module
//!
//! Handles generation, the config subcommands and logging setup.

mod commands;
mod logging;

pub use commands::{
    ConfigSubcommand, GenerateOptions, generate, generate_with, handle_config_command,
};
pub use logging::*;
