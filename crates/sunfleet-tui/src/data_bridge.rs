//! Data bridge: forwards [`FleetController`] streams into the action loop.
//!
//! Runs as a background task for as long as the view is mounted. Sends
//! the current snapshots first, then one [`Action`] per change.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sunfleet_core::FleetController;

use crate::action::{Action, ReferenceData};

pub async fn spawn_data_bridge(
    controller: FleetController,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let store = Arc::clone(controller.store());

    let mut vehicles = controller.vehicles();
    let mut alerts = controller.alerts();
    let mut selected = store.subscribe_selected();
    let mut ticks = store.subscribe_ticks();
    let mut sim_state = controller.simulator_state();
    let mut raised = controller.raised_alerts();

    // Initial snapshots so screens never render empty while waiting for a tick
    let _ = action_tx.send(Action::ReferenceLoaded(Arc::new(ReferenceData::collect(
        &controller,
    ))));
    let _ = action_tx.send(Action::VehiclesUpdated(Arc::clone(vehicles.current())));
    let _ = action_tx.send(Action::AlertsUpdated(Arc::clone(alerts.current())));
    let _ = action_tx.send(Action::SelectionChanged(selected.borrow_and_update().clone()));
    let _ = action_tx.send(Action::SimulatorStateChanged(*sim_state.borrow_and_update()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(v) = vehicles.changed() => {
                let _ = action_tx.send(Action::VehiclesUpdated(v));
            }
            Some(a) = alerts.changed() => {
                let _ = action_tx.send(Action::AlertsUpdated(a));
            }
            Ok(()) = selected.changed() => {
                let id = selected.borrow_and_update().clone();
                let _ = action_tx.send(Action::SelectionChanged(id));
            }
            Ok(()) = ticks.changed() => {
                let count = *ticks.borrow_and_update();
                let _ = action_tx.send(Action::TickRecorded {
                    count,
                    at: store.last_tick(),
                });
            }
            Ok(()) = sim_state.changed() => {
                let state = *sim_state.borrow_and_update();
                let _ = action_tx.send(Action::SimulatorStateChanged(state));
            }
            result = raised.recv() => match result {
                Ok(alert) => {
                    let _ = action_tx.send(Action::AlertRaised(alert));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "alert notifications lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    debug!("data bridge shut down");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use sunfleet_core::{FleetSeed, SimulationConfig};

    use super::*;

    #[tokio::test]
    async fn sends_initial_snapshots_then_stops_on_cancel() {
        let controller =
            FleetController::new(SimulationConfig::default(), FleetSeed::sunshine(Utc::now()))
                .unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task = tokio::spawn(spawn_data_bridge(controller, tx, cancel.clone()));

        let mut vehicles = None;
        let mut drivers = None;
        for _ in 0..5 {
            match rx.recv().await.unwrap() {
                Action::VehiclesUpdated(v) => vehicles = Some(v.len()),
                Action::ReferenceLoaded(r) => drivers = Some(r.drivers.len()),
                _ => {}
            }
        }
        assert_eq!(vehicles, Some(8));
        assert_eq!(drivers, Some(8));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }
}
