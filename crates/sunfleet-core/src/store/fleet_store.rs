// ── Central reactive fleet store ──
//
// Read side of the fleet. The controller task is the only writer; UIs
// read snapshots or subscribe to `watch`-backed entity streams.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::EntityCollection;
use crate::model::{
    Alert, AlertId, Driver, DriverId, FuelRecord, MaintenanceRecord, Trip, Utilization, Vehicle,
    VehicleId,
};
use crate::seed::FleetSeed;
use crate::simulator::FleetState;
use crate::stream::EntityStream;

/// Reactive store for every fleet collection.
///
/// Vehicles and alerts are republished after each tick or command;
/// the rest is reference data loaded once from the seed.
pub struct FleetStore {
    pub(crate) vehicles: EntityCollection<Vehicle>,
    pub(crate) alerts: EntityCollection<Alert>,
    pub(crate) drivers: EntityCollection<Driver>,
    pub(crate) trips: EntityCollection<Trip>,
    pub(crate) maintenance: EntityCollection<MaintenanceRecord>,
    pub(crate) fuel_history: EntityCollection<FuelRecord>,
    pub(crate) utilization: EntityCollection<Utilization>,
    pub(crate) selected: watch::Sender<Option<VehicleId>>,
    pub(crate) last_tick: watch::Sender<Option<DateTime<Utc>>>,
    pub(crate) tick_count: watch::Sender<u64>,
}

impl FleetStore {
    pub fn new() -> Self {
        let (selected, _) = watch::channel(None);
        let (last_tick, _) = watch::channel(None);
        let (tick_count, _) = watch::channel(0);

        Self {
            vehicles: EntityCollection::new(),
            alerts: EntityCollection::new(),
            drivers: EntityCollection::new(),
            trips: EntityCollection::new(),
            maintenance: EntityCollection::new(),
            fuel_history: EntityCollection::new(),
            utilization: EntityCollection::new(),
            selected,
            last_tick,
            tick_count,
        }
    }

    // ── Writers (controller only) ────────────────────────────────────

    /// Load the immutable reference collections.
    pub(crate) fn load_reference(&self, seed: &FleetSeed) {
        self.drivers.replace_all(
            seed.drivers
                .iter()
                .map(|d| (d.id.to_string(), d.clone())),
        );
        self.trips
            .replace_all(seed.trips.iter().map(|t| (t.id.to_string(), t.clone())));
        self.maintenance.replace_all(
            seed.maintenance
                .iter()
                .map(|m| (m.id.to_string(), m.clone())),
        );
        self.fuel_history.replace_all(
            seed.fuel_history
                .iter()
                .map(|f| (f.date.clone(), f.clone())),
        );
        self.utilization.replace_all(
            seed.utilization
                .iter()
                .map(|u| (u.name.clone(), u.clone())),
        );
    }

    /// Publish the mutable half of the fleet.
    pub(crate) fn apply_state(&self, state: &FleetState) {
        self.vehicles.replace_all(
            state
                .vehicles
                .iter()
                .map(|v| (v.id.to_string(), v.clone())),
        );
        self.alerts.replace_all(
            state
                .alerts
                .iter()
                .map(|a| (a.id.to_string(), a.clone())),
        );
        self.selected.send_if_modified(|current| {
            if *current == state.selected {
                false
            } else {
                current.clone_from(&state.selected);
                true
            }
        });
    }

    pub(crate) fn record_tick(&self, at: DateTime<Utc>) {
        self.last_tick.send_modify(|t| *t = Some(at));
        self.tick_count.send_modify(|n| *n += 1);
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn vehicles_snapshot(&self) -> Arc<Vec<Arc<Vehicle>>> {
        self.vehicles.snapshot()
    }

    pub fn alerts_snapshot(&self) -> Arc<Vec<Arc<Alert>>> {
        self.alerts.snapshot()
    }

    pub fn drivers_snapshot(&self) -> Arc<Vec<Arc<Driver>>> {
        self.drivers.snapshot()
    }

    pub fn trips_snapshot(&self) -> Arc<Vec<Arc<Trip>>> {
        self.trips.snapshot()
    }

    pub fn maintenance_snapshot(&self) -> Arc<Vec<Arc<MaintenanceRecord>>> {
        self.maintenance.snapshot()
    }

    pub fn fuel_history_snapshot(&self) -> Arc<Vec<Arc<FuelRecord>>> {
        self.fuel_history.snapshot()
    }

    pub fn utilization_snapshot(&self) -> Arc<Vec<Arc<Utilization>>> {
        self.utilization.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn vehicle_by_id(&self, id: &VehicleId) -> Option<Arc<Vehicle>> {
        self.vehicles.get(id.as_str())
    }

    pub fn alert_by_id(&self, id: &AlertId) -> Option<Arc<Alert>> {
        self.alerts.get(id.as_str())
    }

    pub fn driver_by_id(&self, id: &DriverId) -> Option<Arc<Driver>> {
        self.drivers.get(id.as_str())
    }

    pub fn selected_vehicle(&self) -> Option<Arc<Vehicle>> {
        let id = self.selected.borrow().clone()?;
        self.vehicle_by_id(&id)
    }

    // ── Counts ───────────────────────────────────────────────────────

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    /// Number of times the vehicle snapshot has been republished.
    pub fn vehicles_version(&self) -> u64 {
        self.vehicles.version()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_vehicles(&self) -> EntityStream<Vehicle> {
        EntityStream::new(self.vehicles.subscribe())
    }

    pub fn subscribe_alerts(&self) -> EntityStream<Alert> {
        EntityStream::new(self.alerts.subscribe())
    }

    pub fn subscribe_drivers(&self) -> EntityStream<Driver> {
        EntityStream::new(self.drivers.subscribe())
    }

    pub fn subscribe_selected(&self) -> watch::Receiver<Option<VehicleId>> {
        self.selected.subscribe()
    }

    pub fn subscribe_ticks(&self) -> watch::Receiver<u64> {
        self.tick_count.subscribe()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_tick(&self) -> Option<DateTime<Utc>> {
        *self.last_tick.borrow()
    }

    pub fn tick_count(&self) -> u64 {
        *self.tick_count.borrow()
    }

    /// How long ago the last tick landed, or `None` before the first.
    pub fn data_age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.last_tick().map(|t| now - t)
    }
}

impl Default for FleetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn loaded() -> (FleetStore, FleetState) {
        let seed = FleetSeed::sunshine(Utc::now());
        let store = FleetStore::new();
        store.load_reference(&seed);
        let state = FleetState::from_seed(&seed, 20);
        store.apply_state(&state);
        (store, state)
    }

    #[test]
    fn reference_data_is_loaded() {
        let (store, _) = loaded();
        assert_eq!(store.drivers_snapshot().len(), 8);
        assert_eq!(store.trips_snapshot().len(), 5);
        assert_eq!(store.maintenance_snapshot().len(), 6);
        assert_eq!(store.fuel_history_snapshot().len(), 7);
        assert_eq!(store.utilization_snapshot().len(), 8);
        assert!(store.driver_by_id(&DriverId::from("driver-6")).is_some());
    }

    #[test]
    fn alerts_keep_state_order() {
        let (store, state) = loaded();
        let ids: Vec<_> = store.alerts_snapshot().iter().map(|a| a.id.clone()).collect();
        let expected: Vec<_> = state.alerts.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn selection_is_published() {
        let (store, mut state) = loaded();
        assert!(store.selected_vehicle().is_none());

        state.select_vehicle(Some(&VehicleId::from("vehicle-2")));
        store.apply_state(&state);
        assert_eq!(store.selected_vehicle().unwrap().name, "Sunshine Van 02");
    }

    #[test]
    fn ticks_are_counted() {
        let (store, _) = loaded();
        assert!(store.last_tick().is_none());
        let at = Utc::now();
        store.record_tick(at);
        store.record_tick(at);
        assert_eq!(store.tick_count(), 2);
        assert_eq!(store.last_tick(), Some(at));
        assert_eq!(store.data_age(at), Some(chrono::Duration::zero()));
    }
}
