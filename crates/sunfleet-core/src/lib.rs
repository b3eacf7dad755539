//! Mock fleet simulator and reactive data layer for the sunfleet CLI/TUI.
//!
//! - **[`FleetController`]**: Mounts the simulator: [`start()`](FleetController::start)
//!   spawns one task that owns the fleet state and serializes timer ticks
//!   with user [`Command`]s; [`stop()`](FleetController::stop) cancels and
//!   joins it. [`run_ticks()`](FleetController::run_ticks) drives the same
//!   state headlessly for scripted runs.
//!
//! - **[`Simulator`]**: Pure tick logic over an owned [`FleetState`]:
//!   speed/fuel jitter for active vehicles and probabilistic alert
//!   generation into a capped, newest-first list.
//!
//! - **[`FleetStore`]**: `DashMap` + `watch` backed collections that
//!   publish ordered `Arc` snapshots; [`EntityStream<T>`] wraps a
//!   subscription for reactive rendering.
//!
//! - **Reference data** ([`seed`]) and the simulated [`contact`] form.

pub mod clock;
pub mod command;
pub mod config;
pub mod contact;
pub mod controller;
pub mod error;
pub mod model;
pub mod seed;
pub mod simulator;
pub mod store;
pub mod stream;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, CommandResult};
pub use config::{MAX_TICK_INTERVAL, SeverityModel, SimulationConfig};
pub use contact::{ContactForm, ContactRequest, FormPhase, ServiceType};
pub use controller::{FleetController, SimulatorState};
pub use error::CoreError;
pub use seed::FleetSeed;
pub use simulator::{FleetState, Simulator, TickReport, push_alert};
pub use store::FleetStore;
pub use stream::{AlertFilter, EntityStream, VehicleFilter};
pub use summary::FleetSummary;

pub use model::{
    Alert, AlertId, AlertKind, AlertSeverity, Driver, DriverId, DriverRef, DriverStatus,
    FuelRecord, FuelTotals, Location, MaintenanceId, MaintenanceKind, MaintenanceRecord,
    MaintenanceStatus, Ride, RideDriver, RideId, RideStatus, SupportMetrics, SupportTicket,
    TicketId, TicketPriority, TicketStats, TicketStatus, Trip, TripId, TripStatus, Utilization,
    Vehicle, VehicleId, VehicleKind, VehicleStatus,
};
