//! Alert command handlers.

use std::sync::Arc;

use tabled::Tabled;

use sunfleet_core::{Alert, AlertFilter, FleetController};

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Ack")]
    ack: &'static str,
}

impl AlertRow {
    pub(crate) fn new(a: &Alert, paint: Painter) -> Self {
        Self {
            id: a.id.to_string(),
            severity: paint.severity(a.severity),
            kind: a.kind.to_string(),
            vehicle: a.vehicle_name.clone(),
            message: a.message.clone(),
            time: output::timestamp(a.timestamp),
            ack: if a.acknowledged { "yes" } else { "no" },
        }
    }
}

fn filters(unacknowledged: bool, severity: Option<&str>) -> Result<Vec<AlertFilter>, CliError> {
    let mut filters = Vec::new();
    if unacknowledged {
        filters.push(AlertFilter::Unacknowledged);
    }
    if let Some(severity) = severity {
        filters.push(AlertFilter::BySeverity(util::parse_flag(
            "severity",
            severity,
            "low, medium, high",
        )?));
    }
    Ok(filters)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    controller: &FleetController,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let paint = Painter::new(&global.color());
    match args.command {
        AlertsCommand::List {
            unacknowledged,
            severity,
        } => {
            let filters = filters(unacknowledged, severity.as_deref())?;
            let snap: Vec<Arc<Alert>> = controller
                .alerts_snapshot()
                .iter()
                .filter(|a| filters.iter().all(|f| f.matches(a)))
                .cloned()
                .collect();
            let out = output::render_list(
                &global.output(),
                &snap,
                |a| AlertRow::new(a, paint),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
