//! Vehicle command handlers.

use std::sync::Arc;

use tabled::Tabled;

use sunfleet_core::{CoreError, FleetController, Vehicle, VehicleFilter, VehicleId};

use crate::cli::{GlobalOpts, VehicleListArgs, VehiclesArgs, VehiclesCommand};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Fuel")]
    fuel: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl VehicleRow {
    pub(crate) fn new(v: &Vehicle, paint: Painter) -> Self {
        Self {
            id: v.id.to_string(),
            name: v.name.clone(),
            kind: v.kind.to_string(),
            plate: v.license_plate.clone(),
            status: paint.status(v.status),
            driver: output::or_dash(v.driver_name()),
            speed: format!("{:.0} mph", v.speed),
            fuel: output::percent(v.fuel_level),
            location: v.location.address.clone(),
        }
    }
}

fn detail(v: &Arc<Vehicle>) -> String {
    [
        format!("ID:          {}", v.id),
        format!("Name:        {}", v.name),
        format!("Kind:        {}", v.kind),
        format!("Plate:       {}", v.license_plate),
        format!("Status:      {}", v.status),
        format!("Driver:      {}", output::or_dash(v.driver_name())),
        format!("Speed:       {:.1} mph", v.speed),
        format!("Fuel:        {}", output::percent(v.fuel_level)),
        format!("Odometer:    {} mi", v.odometer),
        format!("Location:    {}", v.location.address),
        format!(
            "Coordinates: {:.4}, {:.4}",
            v.location.lat, v.location.lng
        ),
        format!("Updated:     {}", output::timestamp(v.last_update)),
    ]
    .join("\n")
}

fn filters(args: &VehicleListArgs) -> Result<Vec<VehicleFilter>, CliError> {
    let mut filters = Vec::new();
    if let Some(status) = &args.status {
        filters.push(VehicleFilter::ByStatus(util::parse_flag(
            "status",
            status,
            "active, idle, maintenance, offline",
        )?));
    }
    if let Some(kind) = &args.kind {
        filters.push(VehicleFilter::ByKind(util::parse_flag(
            "kind",
            kind,
            "van, sedan, accessible",
        )?));
    }
    if let Some(query) = &args.search {
        filters.push(VehicleFilter::Search(query.clone()));
    }
    Ok(filters)
}

/// Match by id first, then by license plate (case-insensitive).
fn find(controller: &FleetController, identifier: &str) -> Result<Arc<Vehicle>, CliError> {
    let store = controller.store();
    if let Some(v) = store.vehicle_by_id(&VehicleId::new(identifier)) {
        return Ok(v);
    }
    store
        .vehicles_snapshot()
        .iter()
        .find(|v| v.license_plate.eq_ignore_ascii_case(identifier))
        .cloned()
        .ok_or_else(|| {
            CoreError::VehicleNotFound {
                identifier: identifier.into(),
            }
            .into()
        })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    controller: &FleetController,
    args: VehiclesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let paint = Painter::new(&global.color());
    match args.command {
        VehiclesCommand::List(list) => {
            let filters = filters(&list)?;
            let snap: Vec<Arc<Vehicle>> = controller
                .vehicles_snapshot()
                .iter()
                .filter(|v| filters.iter().all(|f| f.matches(v)))
                .cloned()
                .collect();
            let out = output::render_list(
                &global.output(),
                &snap,
                |v| VehicleRow::new(v, paint),
                |v| v.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VehiclesCommand::Get { vehicle } => {
            let v = find(controller, &vehicle)?;
            let out = output::render_single(&global.output(), &v, detail, |v| v.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn ctl() -> FleetController {
        util::controller(&Config::default()).unwrap()
    }

    #[test]
    fn find_by_id_or_plate() {
        let ctl = ctl();
        assert_eq!(find(&ctl, "vehicle-3").unwrap().id.as_str(), "vehicle-3");
        assert_eq!(find(&ctl, "co-sun-003").unwrap().id.as_str(), "vehicle-3");
    }

    #[test]
    fn unknown_vehicle_is_not_found() {
        let err = find(&ctl(), "vehicle-99").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::NOT_FOUND);
    }

    #[test]
    fn filters_combine() {
        let args = VehicleListArgs {
            status: Some("active".into()),
            kind: None,
            search: None,
        };
        let filters = filters(&args).unwrap();
        let ctl = ctl();
        let active = ctl
            .vehicles_snapshot()
            .iter()
            .filter(|v| filters.iter().all(|f| f.matches(v)))
            .count();
        assert_eq!(active, 5);
    }

    #[test]
    fn bad_kind_is_rejected() {
        let args = VehicleListArgs {
            status: None,
            kind: Some("bus".into()),
            search: None,
        };
        assert!(filters(&args).is_err());
    }
}
