//! Config subcommand handlers.

use std::io::IsTerminal;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::invalid("interactive", format!("prompt failed: {e}"))
}

fn render_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# failed to render config: {e}"))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::resolved_path(global);
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let out = output::render_single(&global.output(), &cfg, render_toml, |_| {
                path.display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                if !std::io::stdin().is_terminal() {
                    return Err(CliError::ConfigExists {
                        path: path.display().to_string(),
                    });
                }
                let overwrite = dialoguer::Confirm::new()
                    .with_prompt(format!("{} exists. Overwrite?", path.display()))
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?;
                if !overwrite {
                    return Ok(());
                }
            }

            config::save_config_to(&Config::default(), &path)?;
            if !global.quiet {
                eprintln!("✓ Wrote default config to {}", path.display());
            }
            Ok(())
        }
    }
}
