//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use sunfleet_config::ConfigError;
use sunfleet_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    #[allow(dead_code)]
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(sunfleet::not_found),
        help("Run: sunfleet {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sunfleet::validation))]
    Validation { field: String, reason: String },

    // ── Simulator ────────────────────────────────────────────────────
    #[error("Simulator error: {message}")]
    #[diagnostic(code(sunfleet::simulator))]
    Simulator { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration: {field}: {reason}")]
    #[diagnostic(
        code(sunfleet::config_invalid),
        help("Fix the value in your config file or SUNFLEET_* environment.\nSee: sunfleet config show")
    )]
    ConfigInvalid { field: String, reason: String },

    #[error("Could not load configuration")]
    #[diagnostic(
        code(sunfleet::config),
        help("Check the TOML syntax of the file reported by: sunfleet config path")
    )]
    Config(#[source] ConfigError),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(sunfleet::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(sunfleet::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigInvalid { .. } | Self::ConfigExists { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::VehicleNotFound { identifier } => CliError::NotFound {
                resource_type: "vehicle".into(),
                identifier,
                list_command: "vehicles list".into(),
            },

            CoreError::AlertNotFound { identifier } => CliError::NotFound {
                resource_type: "alert".into(),
                identifier,
                list_command: "alerts list".into(),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            other @ (CoreError::SimulatorStopped
            | CoreError::AlreadyRunning
            | CoreError::Internal(_)) => CliError::Simulator {
                message: other.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::ConfigInvalid { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_exits_with_four() {
        let err = CliError::from(CoreError::VehicleNotFound {
            identifier: "vehicle-99".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(err.to_string().contains("vehicle-99"));
    }

    #[test]
    fn validation_exits_with_two() {
        let err = CliError::from(CoreError::validation("name is required"));
        assert_eq!(err.exit_code(), exit_code::USAGE);

        let err = CliError::from(ConfigError::Validation {
            field: "simulation.alert_capacity".into(),
            reason: "must be at least 1".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn lifecycle_errors_are_general() {
        let err = CliError::from(CoreError::AlreadyRunning);
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
