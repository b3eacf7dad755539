// ── Alert domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{AlertId, VehicleId};

/// Alert category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AlertKind {
    Speeding,
    Idle,
    Geofence,
    HarshBraking,
    Maintenance,
    FuelLow,
}

impl AlertKind {
    /// Categories the simulator draws from. `Maintenance` and `FuelLow`
    /// only ever come from seed data.
    pub const RANDOM: [Self; 4] = [
        Self::Speeding,
        Self::Idle,
        Self::Geofence,
        Self::HarshBraking,
    ];

    pub fn canned_message(self) -> &'static str {
        match self {
            Self::Speeding => "Speed limit exceeded on mountain road",
            Self::Idle => "Vehicle idle for extended period",
            Self::Geofence => "Entering ski resort zone",
            Self::HarshBraking => "Harsh braking detected",
            Self::Maintenance => "Maintenance required",
            Self::FuelLow => "Low fuel warning",
        }
    }

    pub fn is_random_eligible(self) -> bool {
        Self::RANDOM.contains(&self)
    }
}

/// Alert severity, ordered `Low < Medium < High`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

/// A fleet alert. Only `acknowledged` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub severity: AlertSeverity,
    pub acknowledged: bool,
}

impl AsRef<Alert> for Alert {
    fn as_ref(&self) -> &Alert {
        self
    }
}
