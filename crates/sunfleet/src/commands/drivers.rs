//! Driver command handlers.

use std::sync::Arc;

use tabled::Tabled;

use sunfleet_core::{Driver, FleetController};

use crate::cli::{DriversArgs, DriversCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DriverRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "License")]
    license: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Trips")]
    trips: u32,
    #[tabled(rename = "Safety")]
    safety: u8,
}

impl From<&Arc<Driver>> for DriverRow {
    fn from(d: &Arc<Driver>) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            phone: d.phone.clone(),
            license: d.license.clone(),
            status: d.status.to_string(),
            rating: format!("{:.1}", d.rating),
            trips: d.total_trips,
            safety: d.safety_score,
        }
    }
}

pub fn handle(
    controller: &FleetController,
    args: DriversArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DriversCommand::List => {
            let snap = controller.store().drivers_snapshot();
            let out = output::render_list(
                &global.output(),
                &snap,
                |d| DriverRow::from(d),
                |d| d.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
