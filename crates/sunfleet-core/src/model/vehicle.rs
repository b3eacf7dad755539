// ── Vehicle domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{DriverId, VehicleId};

/// Vehicle body category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum VehicleKind {
    Van,
    Sedan,
    Accessible,
}

/// Operational status. Only `Active` vehicles receive telemetry updates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum VehicleStatus {
    Active,
    Idle,
    Maintenance,
    Offline,
}

impl VehicleStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Active and idle vehicles count as available for utilization.
    pub fn is_in_service(self) -> bool {
        matches!(self, Self::Active | Self::Idle)
    }
}

/// Geographic position plus a human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// The driver currently assigned to a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRef {
    pub id: DriverId,
    pub name: String,
}

/// A fleet vehicle with its live telemetry.
///
/// `speed` (mph) and `fuel_level` (percent, 0-100) are never negative;
/// the simulator clamps both at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub kind: VehicleKind,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub driver: Option<DriverRef>,
    pub location: Location,
    pub fuel_level: f64,
    pub odometer: u32,
    pub speed: f64,
    pub last_update: DateTime<Utc>,
}

impl Vehicle {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Case-insensitive substring match over name, plate and address.
    /// An empty query matches every vehicle.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.license_plate.to_lowercase().contains(&needle)
            || self.location.address.to_lowercase().contains(&needle)
    }

    pub fn driver_name(&self) -> Option<&str> {
        self.driver.as_ref().map(|d| d.name.as_str())
    }
}

impl AsRef<Vehicle> for Vehicle {
    fn as_ref(&self) -> &Vehicle {
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn van() -> Vehicle {
        Vehicle {
            id: VehicleId::from("vehicle-1"),
            name: "Sunshine Van 01".into(),
            kind: VehicleKind::Van,
            license_plate: "CO-SUN-001".into(),
            status: VehicleStatus::Active,
            driver: None,
            location: Location {
                lat: 39.0639,
                lng: -108.5506,
                address: "Grand Junction, CO".into(),
            },
            fuel_level: 78.0,
            odometer: 45_230,
            speed: 55.0,
            last_update: Utc::now(),
        }
    }

    #[test]
    fn query_matches_name_plate_and_address() {
        let v = van();
        assert!(v.matches_query("van 01"));
        assert!(v.matches_query("co-sun"));
        assert!(v.matches_query("GRAND"));
        assert!(v.matches_query(""));
        assert!(!v.matches_query("telluride"));
    }

    #[test]
    fn status_parses_kebab_case() {
        assert_eq!("idle".parse::<VehicleStatus>().unwrap(), VehicleStatus::Idle);
        assert_eq!("Active".parse::<VehicleStatus>().unwrap(), VehicleStatus::Active);
        assert_eq!(VehicleStatus::Maintenance.to_string(), "maintenance");
    }

    #[test]
    fn serde_uses_original_tags() {
        let json = serde_json::to_value(van()).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["kind"], "van");
        assert_eq!(json["licensePlate"], "CO-SUN-001");
    }

    #[test]
    fn in_service_covers_active_and_idle() {
        assert!(VehicleStatus::Active.is_in_service());
        assert!(VehicleStatus::Idle.is_in_service());
        assert!(!VehicleStatus::Maintenance.is_in_service());
        assert!(!VehicleStatus::Offline.is_in_service());
    }
}
