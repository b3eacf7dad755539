//! Fleet summary handler.

use sunfleet_core::{FleetController, FleetSummary, FuelTotals};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Painter};

pub(crate) fn detail(s: &FleetSummary, paint: Painter) -> String {
    [
        paint.heading("Fleet"),
        format!("  Vehicles:     {}", s.total),
        format!("  Active:       {}", s.active),
        format!("  Idle:         {}", s.idle),
        format!("  Maintenance:  {}", s.maintenance),
        format!("  Offline:      {}", s.offline),
        format!("  Utilization:  {}", output::percent(s.utilization_rate)),
        format!("  Avg fuel:     {}", output::percent(s.average_fuel)),
        paint.heading("Alerts"),
        format!("  Unacknowledged: {}", s.unacknowledged),
        format!("  High:           {}", s.unacknowledged_high),
        format!("  Medium:         {}", s.unacknowledged_medium),
    ]
    .join("\n")
}

pub fn handle(controller: &FleetController, global: &GlobalOpts) -> Result<(), CliError> {
    let paint = Painter::new(&global.color());
    let vehicles = controller.vehicles_snapshot();
    let alerts = controller.alerts_snapshot();
    let summary = FleetSummary::compute(vehicles.as_slice(), alerts.as_slice());
    let fuel = FuelTotals::from_records(controller.store().fuel_history_snapshot().as_slice());

    let out = output::render_single(
        &global.output(),
        &summary,
        |s| {
            format!(
                "{}\n{}\n  Week gallons:   {:.0}\n  Week cost:      ${:.2}\n  Avg MPG:        {:.1}",
                detail(s, paint),
                paint.heading("Fuel"),
                fuel.gallons,
                fuel.cost,
                fuel.average_mpg
            )
        },
        |s| {
            format!(
                "total={}\nactive={}\nidle={}\nmaintenance={}\noffline={}\nunacknowledged={}",
                s.total, s.active, s.idle, s.maintenance, s.offline, s.unacknowledged
            )
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
