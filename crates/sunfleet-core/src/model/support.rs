// ── Rider tracking and customer support ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{RideId, TicketId};

// ── Rides ───────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RideStatus {
    InProgress,
    Completed,
    Cancelled,
    Scheduled,
}

/// Contact card for the driver assigned to a tracked ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideDriver {
    pub name: String,
    pub rating: f64,
    pub vehicle_info: String,
    pub license_plate: String,
    pub phone: String,
}

/// A rider's trip as shown on the tracking view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: RideId,
    pub status: RideStatus,
    pub pickup: String,
    pub dropoff: String,
    /// Display label: a date for past rides, a clock time for the active one.
    pub date: String,
    pub estimated_arrival: Option<String>,
    pub eta_minutes: Option<u32>,
    /// Route completion, 0-100.
    pub progress: Option<u8>,
    pub fare_cents: u32,
    pub driver: Option<RideDriver>,
}

impl Ride {
    pub fn fare_display(&self) -> String {
        format!("${}.{:02}", self.fare_cents / 100, self.fare_cents % 100)
    }
}

// ── Support tickets ─────────────────────────────────────────────────

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
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TicketStatus {
    Open,
    InProgress,
    Pending,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: TicketId,
    pub customer: String,
    pub subject: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Relative label, e.g. `2 hours ago`.
    pub created: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub open: u32,
    pub in_progress: u32,
    pub pending: u32,
    pub resolved: u32,
}

impl TicketStats {
    pub fn total(&self) -> u32 {
        self.open + self.in_progress + self.pending + self.resolved
    }
}

/// Aggregate customer-service metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportMetrics {
    pub ticket_stats: TicketStats,
    pub satisfaction: f64,
    pub avg_response_time: String,
    pub avg_resolution_time: String,
    pub today_resolved: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fare_formats_as_dollars() {
        let ride = Ride {
            id: RideId::from("RIDE-1"),
            status: RideStatus::Completed,
            pickup: "A".into(),
            dropoff: "B".into(),
            date: "Jan 5, 2026".into(),
            estimated_arrival: None,
            eta_minutes: None,
            progress: None,
            fare_cents: 1875,
            driver: None,
        };
        assert_eq!(ride.fare_display(), "$18.75");
    }

    #[test]
    fn ticket_totals() {
        let stats = TicketStats {
            open: 12,
            in_progress: 8,
            pending: 5,
            resolved: 147,
        };
        assert_eq!(stats.total(), 172);
    }
}
