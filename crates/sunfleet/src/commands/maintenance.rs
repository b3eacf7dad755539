//! Maintenance command handlers.

use std::sync::Arc;

use tabled::Tabled;

use sunfleet_core::{FleetController, MaintenanceRecord};

use crate::cli::{GlobalOpts, MaintenanceArgs, MaintenanceCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct MaintenanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Scheduled")]
    scheduled: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&Arc<MaintenanceRecord>> for MaintenanceRow {
    fn from(m: &Arc<MaintenanceRecord>) -> Self {
        Self {
            id: m.id.to_string(),
            vehicle: m.vehicle_name.clone(),
            kind: m.kind.to_string(),
            scheduled: m.scheduled_date.format("%Y-%m-%d").to_string(),
            status: m.status.to_string(),
            cost: m.cost.map_or_else(|| "-".into(), |c| format!("${c}")),
            notes: output::or_dash(m.notes.as_deref()),
        }
    }
}

pub fn handle(
    controller: &FleetController,
    args: MaintenanceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MaintenanceCommand::List => {
            let snap = controller.store().maintenance_snapshot();
            let out = output::render_list(
                &global.output(),
                &snap,
                |m| MaintenanceRow::from(m),
                |m| m.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
