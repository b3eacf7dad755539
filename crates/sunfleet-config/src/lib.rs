//! Shared configuration for the sunfleet CLI and TUI.
//!
//! One TOML file with `[simulation]`, `[defaults]`, `[tui]` and `[contact]`
//! sections, layered over built-in defaults and under `SUNFLEET_*`
//! environment variables, then translated to
//! [`sunfleet_core::SimulationConfig`]. Both binaries depend on this crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sunfleet_core::{MAX_TICK_INTERVAL, SeverityModel, SimulationConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Global output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub tui: TuiSection,

    #[serde(default)]
    pub contact: ContactSection,
}

/// `[simulation]`: knobs for the mock telemetry loop.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationSection {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_alert_probability")]
    pub alert_probability: f64,

    #[serde(default = "default_alert_capacity")]
    pub alert_capacity: usize,

    #[serde(default = "default_speed_jitter")]
    pub speed_jitter: f64,

    #[serde(default = "default_fuel_burn_max")]
    pub fuel_burn_max: f64,

    #[serde(default)]
    pub severity_model: SeverityModel,

    /// Fixed RNG seed. Unset means a fresh seed every run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            alert_probability: default_alert_probability(),
            alert_capacity: default_alert_capacity(),
            speed_jitter: default_speed_jitter(),
            fuel_burn_max: default_fuel_burn_max(),
            severity_model: SeverityModel::default(),
            seed: None,
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    5000
}
fn default_alert_probability() -> f64 {
    0.10
}
fn default_alert_capacity() -> usize {
    20
}
fn default_speed_jitter() -> f64 {
    5.0
}
fn default_fuel_burn_max() -> f64 {
    0.1
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// `[tui]`: terminal dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TuiSection {
    /// Log file path. Unset falls back to [`default_log_file`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_render_rate_ms")]
    pub render_rate_ms: u64,
}

impl Default for TuiSection {
    fn default() -> Self {
        Self {
            log_file: None,
            tick_rate_ms: default_tick_rate_ms(),
            render_rate_ms: default_render_rate_ms(),
        }
    }
}

impl TuiSection {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn render_rate(&self) -> Duration {
        Duration::from_millis(self.render_rate_ms)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_file)
    }
}

fn default_tick_rate_ms() -> u64 {
    250
}
fn default_render_rate_ms() -> u64 {
    33
}

/// `[contact]`: the simulated contact form.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContactSection {
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

impl Default for ContactSection {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

impl ContactSection {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

fn default_submit_delay_ms() -> u64 {
    u64::try_from(sunfleet_core::contact::DEFAULT_SUBMIT_DELAY.as_millis()).unwrap_or(1500)
}

// ── Validation & translation ────────────────────────────────────────

impl Config {
    /// Check every section, reporting the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.tick_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "simulation.tick_interval_ms",
                "must be at least 1",
            ));
        }
        if Duration::from_millis(sim.tick_interval_ms) > MAX_TICK_INTERVAL {
            return Err(ConfigError::invalid(
                "simulation.tick_interval_ms",
                format!(
                    "must be at most {}, got {}",
                    MAX_TICK_INTERVAL.as_millis(),
                    sim.tick_interval_ms
                ),
            ));
        }
        if !(0.0..=1.0).contains(&sim.alert_probability) {
            return Err(ConfigError::invalid(
                "simulation.alert_probability",
                format!("must be within [0, 1], got {}", sim.alert_probability),
            ));
        }
        if sim.alert_capacity == 0 {
            return Err(ConfigError::invalid(
                "simulation.alert_capacity",
                "must be at least 1",
            ));
        }
        if !sim.speed_jitter.is_finite() || sim.speed_jitter < 0.0 {
            return Err(ConfigError::invalid(
                "simulation.speed_jitter",
                format!("must be non-negative, got {}", sim.speed_jitter),
            ));
        }
        if !sim.fuel_burn_max.is_finite() || sim.fuel_burn_max < 0.0 {
            return Err(ConfigError::invalid(
                "simulation.fuel_burn_max",
                format!("must be non-negative, got {}", sim.fuel_burn_max),
            ));
        }

        if !matches!(
            self.defaults.output.as_str(),
            "table" | "json" | "json-compact" | "yaml" | "plain"
        ) {
            return Err(ConfigError::invalid(
                "defaults.output",
                format!(
                    "expected table, json, json-compact, yaml or plain, got '{}'",
                    self.defaults.output
                ),
            ));
        }
        if !matches!(self.defaults.color.as_str(), "auto" | "always" | "never") {
            return Err(ConfigError::invalid(
                "defaults.color",
                format!(
                    "expected auto, always or never, got '{}'",
                    self.defaults.color
                ),
            ));
        }

        if self.tui.tick_rate_ms == 0 || self.tui.render_rate_ms == 0 {
            return Err(ConfigError::invalid(
                "tui",
                "tick_rate_ms and render_rate_ms must be at least 1",
            ));
        }
        Ok(())
    }

    /// Build a validated [`SimulationConfig`] for the core controller.
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        self.validate()?;
        let sim = &self.simulation;
        Ok(SimulationConfig {
            tick_interval: Duration::from_millis(sim.tick_interval_ms),
            alert_probability: sim.alert_probability,
            alert_capacity: sim.alert_capacity,
            speed_jitter: sim.speed_jitter,
            fuel_burn_max: sim.fuel_burn_max,
            severity_model: sim.severity_model,
            seed: sim.seed,
        })
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("co", "sunshinerides", "sunfleet")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the TUI writes its log when `[tui] log_file` is unset.
pub fn default_log_file() -> PathBuf {
    project_dirs().map_or_else(
        || std::env::temp_dir().join("sunfleet-tui.log"),
        |dirs| dirs.cache_dir().join("sunfleet-tui.log"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sunfleet");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file just yields defaults.
///
/// Environment overrides use a double underscore between section and key,
/// e.g. `SUNFLEET_SIMULATION__SEED=7`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SUNFLEET_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_match_simulation_defaults() {
        let cfg = Config::default();
        assert_eq!(
            cfg.simulation_config().unwrap(),
            SimulationConfig::default()
        );
        assert_eq!(cfg.contact.submit_delay(), Duration::from_millis(1500));
        assert_eq!(cfg.tui.tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.simulation, SimulationSection::default());
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn file_overrides_layer_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
[simulation]
tick_interval_ms = 1000
seed = 42
severity_model = "normalized"

[defaults]
output = "json"
"#,
        );

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.simulation.tick_interval_ms, 1000);
        assert_eq!(cfg.simulation.seed, Some(42));
        assert_eq!(cfg.simulation.severity_model, SeverityModel::Normalized);
        assert_eq!(cfg.simulation.alert_capacity, 20);
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");

        let sim = cfg.simulation_config().unwrap();
        assert_eq!(sim.tick_interval, Duration::from_secs(1));
        assert_eq!(sim.seed, Some(42));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[simulation]\nalert_probability = 1.5\n");
        let err = load_config_from(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "simulation.alert_probability")
        );
    }

    #[test]
    fn zero_capacity_and_negative_jitter_are_rejected() {
        let mut cfg = Config::default();
        cfg.simulation.alert_capacity = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.simulation.speed_jitter = -1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.simulation.tick_interval_ms = 0;
        assert!(cfg.simulation_config().is_err());
    }

    #[test]
    fn tick_interval_longer_than_a_day_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[simulation]\ntick_interval_ms = 9000000000000000\n");
        let err = load_config_from(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "simulation.tick_interval_ms")
        );

        let mut cfg = Config::default();
        cfg.simulation.tick_interval_ms = 86_400_000;
        assert!(cfg.validate().is_ok());
        cfg.simulation.tick_interval_ms += 1;
        assert!(cfg.simulation_config().is_err());
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let mut cfg = Config::default();
        cfg.defaults.output = "xml".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_figment_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[simulation\nseed = ");
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.simulation.seed = Some(7);
        cfg.simulation.alert_probability = 0.25;
        cfg.contact.submit_delay_ms = 10;
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn invalid_config_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.simulation.alert_capacity = 0;
        assert!(save_config_to(&cfg, &path).is_err());
        assert!(!path.exists());
    }
}
