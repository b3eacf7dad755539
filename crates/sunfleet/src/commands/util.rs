//! Shared helpers for command handlers.

use std::str::FromStr;

use chrono::Utc;

use sunfleet_core::{FleetController, FleetSeed};

use crate::config::Config;
use crate::error::CliError;

/// A stopped controller over the demo fleet, built from `[simulation]`.
pub fn controller(cfg: &Config) -> Result<FleetController, CliError> {
    let sim = cfg.simulation_config()?;
    Ok(FleetController::new(sim, FleetSeed::sunshine(Utc::now()))?)
}

/// Parse a kebab-case enum flag, listing the accepted values on failure.
pub fn parse_flag<T: FromStr>(field: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value
        .parse()
        .map_err(|_| CliError::invalid(field, format!("'{value}' is not one of: {expected}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sunfleet_core::VehicleStatus;

    use super::*;

    #[test]
    fn parse_flag_is_case_insensitive() {
        let s: VehicleStatus = parse_flag("status", "Active", "active, idle").unwrap();
        assert_eq!(s, VehicleStatus::Active);
    }

    #[test]
    fn parse_flag_reports_choices() {
        let err = parse_flag::<VehicleStatus>("status", "parked", "active, idle").unwrap_err();
        assert!(err.to_string().contains("status"));
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn controller_serves_demo_fleet() {
        let ctl = controller(&Config::default()).unwrap();
        assert_eq!(ctl.vehicles_snapshot().len(), 8);
        assert!(!ctl.is_running());
    }
}
