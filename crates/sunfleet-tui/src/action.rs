//! Every state transition in the TUI is expressed as an Action.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use sunfleet_core::{
    Alert, AlertId, Driver, FleetController, FuelRecord, MaintenanceRecord, Ride, SimulatorState,
    SupportMetrics, SupportTicket, Trip, Utilization, Vehicle, VehicleId,
};

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Read-only collections loaded once when the view mounts.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub drivers: Arc<Vec<Arc<Driver>>>,
    pub trips: Arc<Vec<Arc<Trip>>>,
    pub maintenance: Arc<Vec<Arc<MaintenanceRecord>>>,
    pub fuel_history: Arc<Vec<Arc<FuelRecord>>>,
    pub utilization: Arc<Vec<Arc<Utilization>>>,
    pub active_ride: Ride,
    pub recent_rides: Vec<Ride>,
    pub tickets: Vec<SupportTicket>,
    pub support_metrics: SupportMetrics,
}

impl ReferenceData {
    pub fn collect(controller: &FleetController) -> Self {
        let store = controller.store();
        let seed = controller.seed();
        Self {
            drivers: store.drivers_snapshot(),
            trips: store.trips_snapshot(),
            maintenance: store.maintenance_snapshot(),
            fuel_history: store.fuel_history_snapshot(),
            utilization: store.utilization_snapshot(),
            active_ride: seed.active_ride.clone(),
            recent_rides: seed.recent_rides.clone(),
            tickets: seed.tickets.clone(),
            support_metrics: seed.support_metrics.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Data events (from the fleet store) ─────────────────────────
    VehiclesUpdated(Arc<Vec<Arc<Vehicle>>>),
    AlertsUpdated(Arc<Vec<Arc<Alert>>>),
    ReferenceLoaded(Arc<ReferenceData>),
    SelectionChanged(Option<VehicleId>),
    AlertRaised(Arc<Alert>),
    TickRecorded {
        count: u64,
        at: Option<DateTime<Utc>>,
    },
    SimulatorStateChanged(SimulatorState),

    // ── Fleet commands ────────────────────────────────────────────
    SelectVehicle(Option<VehicleId>),
    AcknowledgeAlert(AlertId),
    AcknowledgeAll,

    // ── Contact form ──────────────────────────────────────────────
    /// Form validated and is now waiting out the submission delay.
    ContactSubmitting,
    ContactSubmitted,

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,
    Notify(Notification),
    DismissNotification,
}
