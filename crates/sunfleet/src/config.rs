//! CLI configuration: a thin wrapper around `sunfleet_config`.
//!
//! Resolves which file to read (`--config` beats the platform path) and
//! fills unset global flags from `[defaults]`.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use sunfleet_config::{Config, config_path, load_config_from, save_config_to};

/// The file this invocation reads and writes.
pub fn resolved_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load config for this invocation. A missing file yields defaults; a
/// malformed or invalid one is an error.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config_from(&resolved_path(global))?)
}

/// Fill `--output` / `--color` from `[defaults]` when not given on the
/// command line.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    if global.output.is_none() {
        let parsed = OutputFormat::from_str(&cfg.defaults.output, true)
            .map_err(|reason| CliError::invalid("defaults.output", reason))?;
        global.output = Some(parsed);
    }
    if global.color.is_none() {
        let parsed = ColorMode::from_str(&cfg.defaults.color, true)
            .map_err(|reason| CliError::invalid("defaults.color", reason))?;
        global.color = Some(parsed);
    }
    Ok(())
}
