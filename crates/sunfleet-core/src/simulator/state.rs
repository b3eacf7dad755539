// ── Owned fleet state ──
//
// The mutable half of the fleet: vehicles, alerts and the inspected
// vehicle pointer. Exactly one owner at a time (the controller task, or a
// headless caller) mutates it.

use crate::model::{Alert, AlertId, Vehicle, VehicleId};
use crate::seed::FleetSeed;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetState {
    pub vehicles: Vec<Vehicle>,
    /// Newest first.
    pub alerts: Vec<Alert>,
    pub selected: Option<VehicleId>,
}

impl FleetState {
    /// Take the seed's vehicles and alerts, keeping at most
    /// `alert_capacity` alerts.
    pub fn from_seed(seed: &FleetSeed, alert_capacity: usize) -> Self {
        let mut alerts = seed.alerts.clone();
        alerts.truncate(alert_capacity);
        Self {
            vehicles: seed.vehicles.clone(),
            alerts,
            selected: None,
        }
    }

    pub fn vehicle(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| &v.id == id)
    }

    pub fn alert(&self, id: &AlertId) -> Option<&Alert> {
        self.alerts.iter().find(|a| &a.id == id)
    }

    /// The vehicle currently being inspected, if any.
    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected.as_ref().and_then(|id| self.vehicle(id))
    }

    /// Mark one alert acknowledged. Unknown ids leave the list untouched.
    /// Returns `true` if an alert flipped from unacknowledged.
    pub fn acknowledge(&mut self, id: &AlertId) -> bool {
        match self.alerts.iter_mut().find(|a| &a.id == id) {
            Some(alert) if !alert.acknowledged => {
                alert.acknowledged = true;
                true
            }
            _ => false,
        }
    }

    /// Mark every alert acknowledged. Returns how many flipped.
    pub fn acknowledge_all(&mut self) -> usize {
        let mut flipped = 0;
        for alert in self.alerts.iter_mut().filter(|a| !a.acknowledged) {
            alert.acknowledged = true;
            flipped += 1;
        }
        flipped
    }

    /// Point the inspector at a vehicle. `None` or an id that is not in
    /// the fleet clears the selection. Returns the resulting selection.
    pub fn select_vehicle(&mut self, id: Option<&VehicleId>) -> Option<&VehicleId> {
        self.selected = id.filter(|id| self.vehicle(id).is_some()).cloned();
        self.selected.as_ref()
    }

    pub fn unacknowledged_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.acknowledged).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn state() -> FleetState {
        FleetState::from_seed(&FleetSeed::sunshine(Utc::now()), 20)
    }

    #[test]
    fn acknowledge_flips_one_alert() {
        let mut s = state();
        let before = s.unacknowledged_count();
        assert!(s.acknowledge(&AlertId::from("alert-1")));
        assert_eq!(s.unacknowledged_count(), before - 1);
        assert!(s.alert(&AlertId::from("alert-1")).is_some_and(|a| a.acknowledged));

        // Second acknowledge is a no-op.
        assert!(!s.acknowledge(&AlertId::from("alert-1")));
    }

    #[test]
    fn acknowledge_unknown_leaves_alerts_unchanged() {
        let mut s = state();
        let before = s.alerts.clone();
        assert!(!s.acknowledge(&AlertId::from("alert-404")));
        assert_eq!(s.alerts, before);
    }

    #[test]
    fn acknowledge_all_clears_unacknowledged() {
        let mut s = state();
        assert_eq!(s.acknowledge_all(), 5);
        assert_eq!(s.unacknowledged_count(), 0);
        assert_eq!(s.acknowledge_all(), 0);
    }

    #[test]
    fn select_known_and_unknown_vehicles() {
        let mut s = state();
        let van = VehicleId::from("vehicle-3");
        assert_eq!(s.select_vehicle(Some(&van)), Some(&van));
        assert_eq!(s.selected_vehicle().map(|v| v.name.as_str()), Some("Sunshine Van 03"));

        assert_eq!(s.select_vehicle(Some(&VehicleId::from("vehicle-99"))), None);
        assert!(s.selected.is_none());

        s.select_vehicle(Some(&van));
        assert_eq!(s.select_vehicle(None), None);
    }

    #[test]
    fn selection_does_not_touch_vehicles() {
        let mut s = state();
        let before = s.vehicles.clone();
        s.select_vehicle(Some(&VehicleId::from("vehicle-1")));
        assert_eq!(s.vehicles, before);
    }

    #[test]
    fn from_seed_respects_capacity() {
        let s = FleetState::from_seed(&FleetSeed::sunshine(Utc::now()), 3);
        assert_eq!(s.alerts.len(), 3);
        assert_eq!(s.alerts[0].id.as_str(), "alert-1");
    }
}
