//! Command dispatch: bridges CLI args -> core snapshots -> output formatting.

pub mod alerts;
pub mod config_cmd;
pub mod contact;
pub mod drivers;
pub mod maintenance;
pub mod simulate;
pub mod summary;
pub mod trips;
pub mod util;
pub mod vehicles;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a data command. Config and completions are handled before
/// any config is loaded.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Simulate(args) => simulate::handle(args, cfg, global).await,
        Command::Contact(args) => contact::handle(args, cfg, global).await,

        Command::Vehicles(args) => vehicles::handle(&util::controller(cfg)?, args, global),
        Command::Drivers(args) => drivers::handle(&util::controller(cfg)?, args, global),
        Command::Alerts(args) => alerts::handle(&util::controller(cfg)?, args, global),
        Command::Trips(args) => trips::handle(&util::controller(cfg)?, args, global),
        Command::Maintenance(args) => maintenance::handle(&util::controller(cfg)?, args, global),
        Command::Summary => summary::handle(&util::controller(cfg)?, global),

        Command::Config(_) | Command::Completions(_) => Err(CliError::invalid(
            "command",
            "config and completions are handled before dispatch",
        )),
    }
}
