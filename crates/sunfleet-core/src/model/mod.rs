// ── Fleet domain model ──
//
// Canonical types shared by the simulator, the store and both UIs.
// Enum tags serialize in kebab-case to match the dashboard vocabulary
// (`harsh-braking`, `on-trip`, `in-progress`).

pub mod alert;
pub mod driver;
pub mod entity_id;
pub mod operations;
pub mod support;
pub mod vehicle;

// ── Re-exports ──────────────────────────────────────────────────────

pub use entity_id::{AlertId, DriverId, MaintenanceId, RideId, TicketId, TripId, VehicleId};

pub use alert::{Alert, AlertKind, AlertSeverity};
pub use driver::{Driver, DriverStatus};
pub use operations::{
    FuelRecord, FuelTotals, MaintenanceKind, MaintenanceRecord, MaintenanceStatus, Trip,
    TripStatus, Utilization,
};
pub use support::{
    Ride, RideDriver, RideStatus, SupportMetrics, SupportTicket, TicketPriority, TicketStats,
    TicketStatus,
};
pub use vehicle::{DriverRef, Location, Vehicle, VehicleKind, VehicleStatus};
