// ── Runtime simulation configuration ──
//
// Describes how the simulator behaves. Core never reads config files;
// the CLI/TUI build a `SimulationConfig` (usually via sunfleet-config)
// and hand it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::AlertSeverity;

/// Longest tick period the simulator accepts.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// How a generated alert's severity is drawn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SeverityModel {
    /// Two chained draws: `< 0.3` is high, otherwise a fresh draw `< 0.6`
    /// is medium, else low. Works out to roughly 30/42/28.
    #[default]
    Sequential,
    /// One draw against cumulative weights 30/30/40.
    Normalized,
}

impl SeverityModel {
    /// Pick a severity using `draw` as the source of uniform `[0, 1)` values.
    pub fn pick(self, mut draw: impl FnMut() -> f64) -> AlertSeverity {
        match self {
            Self::Sequential => {
                if draw() < 0.3 {
                    AlertSeverity::High
                } else if draw() < 0.6 {
                    AlertSeverity::Medium
                } else {
                    AlertSeverity::Low
                }
            }
            Self::Normalized => {
                let r = draw();
                if r < 0.3 {
                    AlertSeverity::High
                } else if r < 0.6 {
                    AlertSeverity::Medium
                } else {
                    AlertSeverity::Low
                }
            }
        }
    }
}

/// Tuning for the mock telemetry simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Period between ticks.
    pub tick_interval: Duration,
    /// Chance that a tick generates an alert, in `[0, 1]`.
    pub alert_probability: f64,
    /// Maximum number of alerts retained, newest first.
    pub alert_capacity: usize,
    /// Half-width of the uniform speed delta (mph).
    pub speed_jitter: f64,
    /// Upper bound of the uniform fuel burn per tick (percent).
    pub fuel_burn_max: f64,
    pub severity_model: SeverityModel,
    /// Fixed RNG seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(5000),
            alert_probability: 0.10,
            alert_capacity: 20,
            speed_jitter: 5.0,
            fuel_burn_max: 0.1,
            severity_model: SeverityModel::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.tick_interval.is_zero() {
            return Err(CoreError::validation("tick interval must be at least 1 ms"));
        }
        if self.tick_interval > MAX_TICK_INTERVAL {
            return Err(CoreError::validation(format!(
                "tick interval must be at most {} ms, got {} ms",
                MAX_TICK_INTERVAL.as_millis(),
                self.tick_interval.as_millis()
            )));
        }
        if !(0.0..=1.0).contains(&self.alert_probability) {
            return Err(CoreError::validation(format!(
                "alert probability must be within [0, 1], got {}",
                self.alert_probability
            )));
        }
        if self.alert_capacity == 0 {
            return Err(CoreError::validation("alert capacity must be at least 1"));
        }
        if !self.speed_jitter.is_finite() || self.speed_jitter < 0.0 {
            return Err(CoreError::validation("speed jitter must be non-negative"));
        }
        if !self.fuel_burn_max.is_finite() || self.fuel_burn_max < 0.0 {
            return Err(CoreError::validation("fuel burn must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scripted(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut it = values.iter().copied();
        move || it.next().unwrap_or(0.99)
    }

    #[test]
    fn sequential_uses_second_draw_for_medium() {
        let m = SeverityModel::Sequential;
        assert_eq!(m.pick(scripted(&[0.1])), AlertSeverity::High);
        assert_eq!(m.pick(scripted(&[0.5, 0.2])), AlertSeverity::Medium);
        assert_eq!(m.pick(scripted(&[0.5, 0.7])), AlertSeverity::Low);
    }

    #[test]
    fn normalized_uses_single_draw() {
        let m = SeverityModel::Normalized;
        assert_eq!(m.pick(scripted(&[0.29])), AlertSeverity::High);
        assert_eq!(m.pick(scripted(&[0.45, 0.0])), AlertSeverity::Medium);
        assert_eq!(m.pick(scripted(&[0.61])), AlertSeverity::Low);
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tick_interval, Duration::from_secs(5));
        assert_eq!(cfg.alert_capacity, 20);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cfg = SimulationConfig {
            alert_probability: 1.5,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CoreError::ValidationFailed { .. })
        ));

        let cfg = SimulationConfig {
            alert_capacity: 0,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimulationConfig {
            tick_interval: Duration::ZERO,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimulationConfig {
            speed_jitter: -1.0,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tick_interval_is_capped_at_one_day() {
        let cfg = SimulationConfig {
            tick_interval: MAX_TICK_INTERVAL,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_ok());

        let cfg = SimulationConfig {
            tick_interval: Duration::from_millis(9_000_000_000_000_000),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CoreError::ValidationFailed { .. })
        ));

        let cfg = SimulationConfig {
            tick_interval: Duration::from_millis(u64::MAX),
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
