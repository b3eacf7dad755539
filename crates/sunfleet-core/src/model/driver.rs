// ── Driver domain types ──
//
// Drivers are reference data: loaded once from the seed and never
// mutated while the simulator runs.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::DriverId;
use super::vehicle::DriverRef;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DriverStatus {
    Available,
    OnTrip,
    OffDuty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub phone: String,
    /// License class, e.g. `CDL-B` or `Class C`.
    pub license: String,
    pub status: DriverStatus,
    pub rating: f64,
    pub total_trips: u32,
    pub safety_score: u8,
}

impl Driver {
    pub fn to_ref(&self) -> DriverRef {
        DriverRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}
