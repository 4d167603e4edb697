//! CLI module for jobboard-rs
//!
//! Argument parsing, settings resolution from CLI flags and command dispatch.

pub mod executor;
pub mod parser;
pub mod validation;

pub use executor::{execute_command, run_command};
pub use parser::{Cli, Commands};

use crate::config::{ConfigError, ConfigLoader, Settings};
use crate::logger::init_logger;

/// Loads settings and applies the global CLI overrides.
///
/// `--config` and `--env` pick the sources; `--verbose`, `--quiet` and
/// `--store` override the loaded values.
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut loader = ConfigLoader::new()?;
    if let Some(path) = &cli.config {
        loader = loader.with_config_file(path);
    }
    if let Some(env) = cli.env {
        loader = loader.with_environment(env);
    }

    let mut settings = loader.load()?;
    apply_overrides(&mut settings, cli);
    settings.validate()?;
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }
    if let Some(path) = &cli.store {
        settings.store.snapshot_path = path.clone();
    }
}

/// Initialize logger from settings
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)
}
