// ── Mock fleet state simulator ──
//
// Produces the illusion of live telemetry. Each tick nudges the speed
// and fuel of every active vehicle and, now and then, raises a synthetic
// alert. All transitions are plain functions over owned state so they can
// be driven by a seeded RNG and a manual clock.

mod state;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::config::SimulationConfig;
use crate::model::{Alert, AlertId, AlertKind, Vehicle};

pub use state::FleetState;

/// What a single tick changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub at: DateTime<Utc>,
    /// Number of active vehicles whose telemetry moved.
    pub vehicles_updated: usize,
    /// The alert raised on this tick, if any.
    pub alert: Option<Alert>,
}

/// Applies ticks to a [`FleetState`] according to a [`SimulationConfig`].
///
/// Holds only the alert sequence counter; the fleet itself lives in
/// `FleetState` so the caller decides who owns it.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    alert_seq: u64,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            alert_seq: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run one tick: advance telemetry, then maybe raise an alert.
    ///
    /// The alert's vehicle is drawn from the fleet as it was before this
    /// tick's telemetry update.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        state: &mut FleetState,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> TickReport {
        let before = std::mem::take(&mut state.vehicles);
        state.vehicles = self.advance_vehicles(&before, now, rng);

        let vehicles_updated = before.iter().filter(|v| v.is_active()).count();

        let alert = self.maybe_alert(&before, rng, now);
        if let Some(ref alert) = alert {
            debug!(
                alert_id = %alert.id,
                vehicle = %alert.vehicle_id,
                kind = %alert.kind,
                severity = %alert.severity,
                "alert raised"
            );
            let alerts = std::mem::take(&mut state.alerts);
            state.alerts = push_alert(&alerts, alert.clone(), self.config.alert_capacity);
        }

        trace!(vehicles_updated, alerts = state.alerts.len(), "tick applied");

        TickReport {
            at: now,
            vehicles_updated,
            alert,
        }
    }

    /// Return the fleet with every active vehicle's speed and fuel jittered
    /// and its `last_update` set to `now`. Other vehicles are cloned as-is.
    pub fn advance_vehicles<R: Rng + ?Sized>(
        &self,
        vehicles: &[Vehicle],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<Vehicle> {
        vehicles
            .iter()
            .map(|v| {
                if !v.is_active() {
                    return v.clone();
                }
                let speed_delta = (unit(rng) - 0.5) * 2.0 * self.config.speed_jitter;
                let burn = unit(rng) * self.config.fuel_burn_max;
                Vehicle {
                    speed: (v.speed + speed_delta).max(0.0),
                    fuel_level: (v.fuel_level - burn).max(0.0),
                    last_update: now,
                    ..v.clone()
                }
            })
            .collect()
    }

    fn maybe_alert<R: Rng + ?Sized>(
        &mut self,
        vehicles: &[Vehicle],
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Option<Alert> {
        if unit(rng) >= self.config.alert_probability {
            return None;
        }
        let vehicle = vehicles.choose(rng)?;
        let kind = AlertKind::RANDOM.choose(rng).copied()?;
        let severity = self.config.severity_model.pick(|| unit(rng));

        self.alert_seq += 1;
        Some(Alert {
            id: AlertId::new(format!(
                "alert-{}-{}",
                now.timestamp_millis(),
                self.alert_seq
            )),
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.name.clone(),
            kind,
            message: kind.canned_message().to_owned(),
            timestamp: now,
            severity,
            acknowledged: false,
        })
    }
}

/// Prepend `alert`, keeping at most `capacity` entries (newest first).
pub fn push_alert(alerts: &[Alert], alert: Alert, capacity: usize) -> Vec<Alert> {
    if capacity == 0 {
        return Vec::new();
    }
    let mut next = Vec::with_capacity(capacity.min(alerts.len() + 1));
    next.push(alert);
    next.extend(alerts.iter().take(capacity - 1).cloned());
    next
}

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}
