//! Trip command handlers.

use std::sync::Arc;

use tabled::Tabled;

use sunfleet_core::{FleetController, Trip};

use crate::cli::{GlobalOpts, TripsArgs, TripsCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TripRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Miles")]
    miles: String,
    #[tabled(rename = "Fuel")]
    fuel: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<Trip>> for TripRow {
    fn from(t: &Arc<Trip>) -> Self {
        Self {
            id: t.id.to_string(),
            vehicle: t.vehicle_name.clone(),
            driver: t.driver_name.clone(),
            from: t.start_location.clone(),
            to: t.end_location.clone(),
            started: output::timestamp(t.start_time),
            miles: format!("{:.1}", t.distance),
            fuel: format!("{:.1} gal", t.fuel_used),
            status: t.status.to_string(),
        }
    }
}

pub fn handle(
    controller: &FleetController,
    args: TripsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TripsCommand::List => {
            let snap = controller.store().trips_snapshot();
            let out = output::render_list(
                &global.output(),
                &snap,
                |t| TripRow::from(t),
                |t| t.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
