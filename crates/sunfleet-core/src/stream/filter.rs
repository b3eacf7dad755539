// ── Filter predicates for entity streams ──
//
// Used by the CLI and TUI to narrow snapshots without touching the store.

use crate::model::{Alert, AlertKind, AlertSeverity, Vehicle, VehicleKind, VehicleStatus};

/// Filter predicate for vehicle collections.
pub enum VehicleFilter {
    All,
    ByStatus(VehicleStatus),
    ByKind(VehicleKind),
    /// Case-insensitive match over name, plate and address.
    Search(String),
    Custom(Box<dyn Fn(&Vehicle) -> bool + Send + Sync>),
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        match self {
            Self::All => true,
            Self::ByStatus(s) => vehicle.status == *s,
            Self::ByKind(k) => vehicle.kind == *k,
            Self::Search(q) => vehicle.matches_query(q),
            Self::Custom(f) => f(vehicle),
        }
    }
}

/// Filter predicate for alert collections.
pub enum AlertFilter {
    All,
    Unacknowledged,
    BySeverity(AlertSeverity),
    ByKind(AlertKind),
    Custom(Box<dyn Fn(&Alert) -> bool + Send + Sync>),
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        match self {
            Self::All => true,
            Self::Unacknowledged => !alert.acknowledged,
            Self::BySeverity(s) => alert.severity == *s,
            Self::ByKind(k) => alert.kind == *k,
            Self::Custom(f) => f(alert),
        }
    }
}
