// ── Fleet operations records ──
//
// Trips, maintenance, fuel history and utilization. All read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{DriverId, MaintenanceId, TripId, VehicleId};

// ── Trips ───────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TripStatus {
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub driver_id: DriverId,
    pub driver_name: String,
    pub start_location: String,
    pub end_location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Miles.
    pub distance: f64,
    /// Gallons.
    pub fuel_used: f64,
    pub status: TripStatus,
}

// ── Maintenance ─────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MaintenanceKind {
    OilChange,
    TireRotation,
    Inspection,
    Repair,
    BrakeService,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MaintenanceStatus {
    Scheduled,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub kind: MaintenanceKind,
    pub scheduled_date: DateTime<Utc>,
    pub status: MaintenanceStatus,
    /// Whole dollars.
    pub cost: Option<u32>,
    pub notes: Option<String>,
}

// ── Fuel and utilization ────────────────────────────────────────────

/// One day of fleet-wide fuel consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    /// Short day label (`Mon` .. `Sun`).
    pub date: String,
    pub gallons: f64,
    pub cost: f64,
    pub mpg: f64,
}

impl AsRef<FuelRecord> for FuelRecord {
    fn as_ref(&self) -> &FuelRecord {
        self
    }
}

/// Weekly utilization for a single vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    pub name: String,
    /// Percent of available hours in service.
    pub utilization: u8,
    pub trips: u32,
    pub miles: u32,
}

/// Totals across a fuel history window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FuelTotals {
    pub gallons: f64,
    pub cost: f64,
    pub average_mpg: f64,
}

impl FuelTotals {
    pub fn from_records(records: &[impl AsRef<FuelRecord>]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let mut totals = Self::default();
        let mut mpg_sum = 0.0;
        for r in records {
            let r = r.as_ref();
            totals.gallons += r.gallons;
            totals.cost += r.cost;
            mpg_sum += r.mpg;
        }
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let count = records.len() as f64;
        totals.average_mpg = mpg_sum / count;
        totals
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn day(date: &str, gallons: f64, cost: f64, mpg: f64) -> Arc<FuelRecord> {
        Arc::new(FuelRecord {
            date: date.into(),
            gallons,
            cost,
            mpg,
        })
    }

    #[test]
    fn fuel_totals_sum_and_average() {
        let records = vec![day("Mon", 100.0, 330.0, 18.0), day("Tue", 50.0, 165.0, 20.0)];
        let totals = FuelTotals::from_records(&records);
        assert!((totals.gallons - 150.0).abs() < f64::EPSILON);
        assert!((totals.cost - 495.0).abs() < f64::EPSILON);
        assert!((totals.average_mpg - 19.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fuel_totals_empty_is_zero() {
        let records: Vec<Arc<FuelRecord>> = Vec::new();
        assert_eq!(FuelTotals::from_records(&records), FuelTotals::default());
    }

    #[test]
    fn maintenance_kind_tags() {
        assert_eq!(MaintenanceKind::BrakeService.to_string(), "brake-service");
        assert_eq!(TripStatus::InProgress.to_string(), "in-progress");
    }
}
