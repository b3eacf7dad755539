// ── Fleet summary metrics ──

use serde::Serialize;

use crate::model::{Alert, AlertSeverity, Vehicle, VehicleStatus};

/// Headline numbers for the fleet overview.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total: usize,
    pub active: usize,
    pub idle: usize,
    pub maintenance: usize,
    pub offline: usize,
    /// `(active + idle) / total * 100`; zero for an empty fleet.
    pub utilization_rate: f64,
    pub unacknowledged: usize,
    pub unacknowledged_high: usize,
    pub unacknowledged_medium: usize,
    pub average_fuel: f64,
}

impl FleetSummary {
    pub fn compute<V, A>(vehicles: &[V], alerts: &[A]) -> Self
    where
        V: AsRef<Vehicle>,
        A: AsRef<Alert>,
    {
        let mut s = Self {
            total: vehicles.len(),
            ..Self::default()
        };

        let mut fuel_sum = 0.0;
        for v in vehicles.iter().map(AsRef::as_ref) {
            match v.status {
                VehicleStatus::Active => s.active += 1,
                VehicleStatus::Idle => s.idle += 1,
                VehicleStatus::Maintenance => s.maintenance += 1,
                VehicleStatus::Offline => s.offline += 1,
            }
            fuel_sum += v.fuel_level;
        }

        if s.total > 0 {
            let total = count_f64(s.total);
            s.utilization_rate = count_f64(s.active + s.idle) / total * 100.0;
            s.average_fuel = fuel_sum / total;
        }

        for a in alerts.iter().map(AsRef::as_ref).filter(|a| !a.acknowledged) {
            s.unacknowledged += 1;
            match a.severity {
                AlertSeverity::High => s.unacknowledged_high += 1,
                AlertSeverity::Medium => s.unacknowledged_medium += 1,
                AlertSeverity::Low => {}
            }
        }

        s
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn count_f64(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::seed::FleetSeed;
    use chrono::Utc;

    #[test]
    fn seeded_fleet_summary() {
        let seed = FleetSeed::sunshine(Utc::now());
        let s = FleetSummary::compute(&seed.vehicles, &seed.alerts);

        assert_eq!(s.total, 8);
        assert_eq!(s.active, 5);
        assert_eq!(s.idle, 2);
        assert_eq!(s.maintenance, 1);
        assert_eq!(s.offline, 0);
        assert!((s.utilization_rate - 87.5).abs() < 1e-9);
        assert_eq!(s.unacknowledged, 5);
        assert_eq!(s.unacknowledged_high, 2);
        assert_eq!(s.unacknowledged_medium, 2);
        // (78 + 62 + 85 + 45 + 35 + 92 + 68 + 55) / 8
        assert!((s.average_fuel - 65.0).abs() < 1e-9);
    }

    #[test]
    fn empty_fleet_has_zero_utilization() {
        let vehicles: Vec<Arc<Vehicle>> = Vec::new();
        let alerts: Vec<Arc<Alert>> = Vec::new();
        let s = FleetSummary::compute(&vehicles, &alerts);
        assert_eq!(s, FleetSummary::default());
    }

    #[test]
    fn works_over_shared_snapshots() {
        let seed = FleetSeed::sunshine(Utc::now());
        let vehicles: Vec<Arc<Vehicle>> = seed.vehicles.into_iter().map(Arc::new).collect();
        let alerts: Vec<Arc<Alert>> = seed.alerts.into_iter().map(Arc::new).collect();
        assert_eq!(FleetSummary::compute(&vehicles, &alerts).total, 8);
    }
}
