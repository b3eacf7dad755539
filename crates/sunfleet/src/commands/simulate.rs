//! Headless simulation runs.
//!
//! Builds a controller pinned to a manual clock, applies N ticks without
//! a timer and prints the resulting state. With a seed and `--at`, two
//! runs print byte-identical output.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use sunfleet_core::{Alert, FleetController, FleetSeed, FleetSummary, ManualClock};

use crate::cli::{GlobalOpts, SimulateArgs, SimulateView};
use crate::config::Config;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::alerts::AlertRow;
use super::summary;
use super::vehicles::VehicleRow;

/// What `--show summary` serializes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationOutcome {
    ticks: u32,
    seed: Option<u64>,
    started_at: DateTime<Utc>,
    summary: FleetSummary,
    /// Alerts generated during this run, oldest first.
    raised: Vec<Alert>,
}

fn parse_start(at: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    at.map_or_else(
        || Ok(Utc::now()),
        |raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| CliError::invalid("at", format!("'{raw}' is not RFC 3339: {e}")))
        },
    )
}

fn outcome_detail(o: &SimulationOutcome, paint: Painter) -> String {
    let mut out = format!(
        "{}\n  Ticks: {}\n  Seed:  {}\n{}\n",
        paint.heading("Run"),
        o.ticks,
        o.seed.map_or_else(|| "random".into(), |s| s.to_string()),
        summary::detail(&o.summary, paint),
    );
    out.push_str(&paint.heading("Raised during run"));
    out.push('\n');
    if o.raised.is_empty() {
        out.push_str("  (none)");
    } else {
        let rows: Vec<AlertRow> = o.raised.iter().map(|a| AlertRow::new(a, paint)).collect();
        out.push_str(&output::render_table(&rows));
    }
    out
}

pub async fn handle(args: SimulateArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let start = parse_start(args.at.as_deref())?;

    let mut sim = cfg.simulation_config()?;
    if args.seed.is_some() {
        sim.seed = args.seed;
    }
    let seed = sim.seed;

    let clock = Arc::new(ManualClock::new(start));
    let controller = FleetController::with_clock(sim, FleetSeed::sunshine(start), clock)?;
    let reports = controller.run_ticks(args.ticks).await?;

    let raised: Vec<Alert> = reports.into_iter().filter_map(|r| r.alert).collect();
    info!(ticks = args.ticks, ?seed, raised = raised.len(), "simulation complete");

    let paint = Painter::new(&global.color());
    let format = global.output();
    let out = match args.show {
        SimulateView::Vehicles => output::render_list(
            &format,
            &controller.vehicles_snapshot(),
            |v| VehicleRow::new(v, paint),
            |v| format!("{} {:.2} {:.2}", v.id, v.speed, v.fuel_level),
        )?,
        SimulateView::Alerts => output::render_list(
            &format,
            &controller.alerts_snapshot(),
            |a| AlertRow::new(a, paint),
            |a| a.id.to_string(),
        )?,
        SimulateView::Summary => {
            let outcome = SimulationOutcome {
                ticks: args.ticks,
                seed,
                started_at: start,
                summary: FleetSummary::compute(
                    controller.vehicles_snapshot().as_slice(),
                    controller.alerts_snapshot().as_slice(),
                ),
                raised,
            };
            output::render_single(
                &format,
                &outcome,
                |o| outcome_detail(o, paint),
                |o| {
                    o.raised
                        .iter()
                        .map(|a| a.id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn start_defaults_to_now_and_parses_rfc3339() {
        let t = parse_start(Some("2026-01-15T08:00:00Z")).unwrap();
        assert_eq!(t.to_rfc3339(), "2026-01-15T08:00:00+00:00");
        assert!(parse_start(None).is_ok());
        assert!(parse_start(Some("yesterday")).is_err());
    }
}
