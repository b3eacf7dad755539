// ── Fleet controller ──
//
// Runtime for a mounted fleet view. One background task owns the fleet
// state, the simulator and the RNG; it serializes timer ticks and user
// commands through a single `select!` loop and republishes snapshots to
// the FleetStore after every mutation.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::sync::{Mutex, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::command::{self, Command, CommandEnvelope, CommandResult};
use crate::config::SimulationConfig;
use crate::error::CoreError;
use crate::model::{Alert, Vehicle};
use crate::seed::FleetSeed;
use crate::simulator::{FleetState, Simulator, TickReport};
use crate::store::FleetStore;
use crate::stream::EntityStream;

const COMMAND_CHANNEL_SIZE: usize = 64;
const ALERT_CHANNEL_SIZE: usize = 64;

// ── SimulatorState ───────────────────────────────────────────────

/// Lifecycle observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    Stopped,
    Running,
}

// ── FleetController ──────────────────────────────────────────────

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Dropping the last handle
/// cancels a running simulation.
#[derive(Clone)]
pub struct FleetController {
    inner: Arc<ControllerInner>,
}

/// Everything the simulation task owns while mounted.
struct Mount {
    state: FleetState,
    simulator: Simulator,
    rng: Box<dyn RngCore + Send>,
}

struct Running {
    cancel: CancellationToken,
    command_tx: mpsc::Sender<CommandEnvelope>,
    handle: JoinHandle<()>,
}

struct ControllerInner {
    config: SimulationConfig,
    seed: Arc<FleetSeed>,
    store: Arc<FleetStore>,
    clock: Arc<dyn Clock>,
    simulator_state: watch::Sender<SimulatorState>,
    alert_tx: broadcast::Sender<Arc<Alert>>,
    /// Fleet state while no task is running; used by headless ticks.
    parked: Mutex<Option<Mount>>,
    running: Mutex<Option<Running>>,
}

impl FleetController {
    /// Build the store and the initial fleet. Does NOT start ticking;
    /// call [`start()`](Self::start) to mount.
    pub fn new(config: SimulationConfig, seed: FleetSeed) -> Result<Self, CoreError> {
        Self::with_clock(config, seed, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: SimulationConfig,
        seed: FleetSeed,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        config.validate()?;

        let store = Arc::new(FleetStore::new());
        store.load_reference(&seed);

        let mount = fresh_mount(&config, &seed, default_rng(&config));
        store.apply_state(&mount.state);

        let (simulator_state, _) = watch::channel(SimulatorState::Stopped);
        let (alert_tx, _) = broadcast::channel(ALERT_CHANNEL_SIZE);

        Ok(Self {
            inner: Arc::new(ControllerInner {
                config,
                seed: Arc::new(seed),
                store,
                clock,
                simulator_state,
                alert_tx,
                parked: Mutex::new(Some(mount)),
                running: Mutex::new(None),
            }),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<FleetStore> {
        &self.inner.store
    }

    /// Immutable reference data (rides, tickets, metrics).
    pub fn seed(&self) -> &Arc<FleetSeed> {
        &self.inner.seed
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Mount: spawn the simulation task with the configured RNG and the
    /// controller's clock.
    pub async fn start(&self) -> Result<(), CoreError> {
        let rng = default_rng(&self.inner.config);
        self.start_with(rng, Arc::clone(&self.inner.clock)).await
    }

    /// Mount with an explicit RNG and clock.
    pub async fn start_with(
        &self,
        rng: Box<dyn RngCore + Send>,
        clock: Arc<dyn Clock>,
    ) -> Result<(), CoreError> {
        let mut running = self.inner.running.lock().await;
        if running.is_some() {
            return Err(CoreError::AlreadyRunning);
        }

        let mut mount = self
            .inner
            .parked
            .lock()
            .await
            .take()
            .unwrap_or_else(|| self.fresh_mount());
        mount.rng = rng;
        self.inner.store.apply_state(&mount.state);

        let cancel = CancellationToken::new();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);

        let handle = tokio::spawn(simulation_task(
            Arc::clone(&self.inner.store),
            mount,
            clock,
            self.inner.config.tick_interval,
            self.inner.alert_tx.clone(),
            command_rx,
            cancel.clone(),
        ));

        *running = Some(Running {
            cancel,
            command_tx,
            handle,
        });
        // `send` is a no-op without receivers; the state must stick regardless
        self.inner.simulator_state.send_replace(SimulatorState::Running);
        info!(
            interval_ms = self.inner.config.tick_interval.as_millis(),
            "simulator started"
        );
        Ok(())
    }

    /// Unmount: cancel the task and wait for it to exit. Nothing is
    /// published to the store once this returns. The next `start()`
    /// begins again from the seed.
    pub async fn stop(&self) {
        let Some(run) = self.inner.running.lock().await.take() else {
            return;
        };
        run.cancel.cancel();
        if let Err(e) = run.handle.await {
            warn!(error = %e, "simulation task ended abnormally");
        }

        *self.inner.parked.lock().await = Some(self.fresh_mount());

        self.inner.simulator_state.send_replace(SimulatorState::Stopped);
        info!("simulator stopped");
    }

    pub fn is_running(&self) -> bool {
        *self.inner.simulator_state.borrow() == SimulatorState::Running
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Send a command to the running simulation task and await its result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if !self.is_running() {
            return Err(CoreError::SimulatorStopped);
        }

        let command_tx = self
            .inner
            .running
            .lock()
            .await
            .as_ref()
            .map(|r| r.command_tx.clone())
            .ok_or(CoreError::SimulatorStopped)?;

        let (tx, rx) = tokio::sync::oneshot::channel();
        command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::SimulatorStopped)?;

        rx.await.map_err(|_| CoreError::SimulatorStopped)?
    }

    // ── Headless ─────────────────────────────────────────────────

    /// Apply `n` ticks immediately, without a timer. Tick `i` is stamped
    /// `clock.now() + i * tick_interval`. Only valid while stopped.
    pub async fn run_ticks(&self, n: u32) -> Result<Vec<TickReport>, CoreError> {
        if self.is_running() {
            return Err(CoreError::AlreadyRunning);
        }
        let mut parked = self.inner.parked.lock().await;
        let mount = parked.get_or_insert_with(|| self.fresh_mount());

        let step = chrono::Duration::from_std(self.inner.config.tick_interval)
            .map_err(|e| CoreError::Internal(format!("tick interval out of range: {e}")))?;
        let base = self.inner.clock.now();
        // Reject the whole run before touching state if the last stamp is unrepresentable
        i32::try_from(n)
            .ok()
            .and_then(|n| step.checked_mul(n))
            .and_then(|span| base.checked_add_signed(span))
            .ok_or_else(|| {
                CoreError::Internal(format!("{n} ticks from {base} overflow the calendar"))
            })?;

        let mut reports = Vec::with_capacity(usize::try_from(n).unwrap_or_default());
        let mut at = base;
        for _ in 0..n {
            at = at
                .checked_add_signed(step)
                .ok_or_else(|| CoreError::Internal(format!("tick time overflowed after {at}")))?;
            let report = mount.simulator.tick(&mut mount.state, &mut *mount.rng, at);
            if let Some(alert) = &report.alert {
                let _ = self.inner.alert_tx.send(Arc::new(alert.clone()));
            }
            self.inner.store.record_tick(at);
            reports.push(report);
        }
        self.inner.store.apply_state(&mount.state);

        debug!(ticks = n, alerts = mount.state.alerts.len(), "headless run complete");
        Ok(reports)
    }

    fn fresh_mount(&self) -> Mount {
        fresh_mount(
            &self.inner.config,
            &self.inner.seed,
            default_rng(&self.inner.config),
        )
    }

    // ── State observation ────────────────────────────────────────

    pub fn simulator_state(&self) -> watch::Receiver<SimulatorState> {
        self.inner.simulator_state.subscribe()
    }

    /// Alerts as they are raised by the simulator.
    pub fn raised_alerts(&self) -> broadcast::Receiver<Arc<Alert>> {
        self.inner.alert_tx.subscribe()
    }

    // ── Snapshot / stream accessors (delegate to FleetStore) ─────

    pub fn vehicles_snapshot(&self) -> Arc<Vec<Arc<Vehicle>>> {
        self.inner.store.vehicles_snapshot()
    }

    pub fn alerts_snapshot(&self) -> Arc<Vec<Arc<Alert>>> {
        self.inner.store.alerts_snapshot()
    }

    pub fn vehicles(&self) -> EntityStream<Vehicle> {
        self.inner.store.subscribe_vehicles()
    }

    pub fn alerts(&self) -> EntityStream<Alert> {
        self.inner.store.subscribe_alerts()
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        if let Some(run) = self.running.get_mut().take() {
            run.cancel.cancel();
        }
    }
}

// ── Background task ──────────────────────────────────────────────

/// Own the mount until cancelled. Ticks and commands are handled one at
/// a time; missed ticks are skipped rather than replayed in a burst.
async fn simulation_task(
    store: Arc<FleetStore>,
    mut mount: Mount,
    clock: Arc<dyn Clock>,
    interval: Duration,
    alert_tx: broadcast::Sender<Arc<Alert>>,
    mut rx: mpsc::Receiver<CommandEnvelope>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let now = clock.now();
                let report = mount.simulator.tick(&mut mount.state, &mut *mount.rng, now);
                store.apply_state(&mount.state);
                store.record_tick(now);
                if let Some(alert) = report.alert {
                    let _ = alert_tx.send(Arc::new(alert));
                }
                debug!(vehicles_updated = report.vehicles_updated, "tick");
            }
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                debug!(command = ?envelope.command, "applying command");
                let result = command::apply(&mut mount.state, envelope.command);
                store.apply_state(&mount.state);
                if envelope.response_tx.send(Ok(result)).is_err() {
                    warn!("command caller went away before the reply");
                }
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn fresh_mount(
    config: &SimulationConfig,
    seed: &FleetSeed,
    rng: Box<dyn RngCore + Send>,
) -> Mount {
    Mount {
        state: FleetState::from_seed(seed, config.alert_capacity),
        simulator: Simulator::new(config.clone()),
        rng,
    }
}

fn default_rng(config: &SimulationConfig) -> Box<dyn RngCore + Send> {
    match config.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{AlertId, VehicleId};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 14, 30, 0).unwrap()
    }

    fn controller(config: SimulationConfig) -> FleetController {
        FleetController::with_clock(
            config,
            FleetSeed::sunshine(t0()),
            Arc::new(ManualClock::new(t0())),
        )
        .unwrap()
    }

    fn seeded(seed: u64) -> Box<dyn RngCore + Send> {
        Box::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = FleetController::new(
            SimulationConfig {
                alert_capacity: 0,
                ..SimulationConfig::default()
            },
            FleetSeed::sunshine(t0()),
        );
        assert!(matches!(result, Err(CoreError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn new_publishes_seed_without_ticking() {
        let ctrl = controller(SimulationConfig::default());
        assert_eq!(ctrl.vehicles_snapshot().len(), 8);
        assert_eq!(ctrl.alerts_snapshot().len(), 6);
        assert_eq!(ctrl.store().tick_count(), 0);
        assert!(!ctrl.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_follow_the_interval() {
        let ctrl = controller(SimulationConfig::default());
        let clock = Arc::new(ManualClock::new(t0()));
        ctrl.start_with(seeded(1), clock).await.unwrap();

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(ctrl.store().tick_count(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(ctrl.store().tick_count(), 1);

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(ctrl.store().tick_count(), 3);

        ctrl.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_published_after_stop() {
        let ctrl = controller(SimulationConfig {
            alert_probability: 1.0,
            ..SimulationConfig::default()
        });
        ctrl.start_with(seeded(2), Arc::new(ManualClock::new(t0())))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(15_100)).await;
        ctrl.stop().await;

        let ticks = ctrl.store().tick_count();
        let version = ctrl.store().vehicles_version();
        let alerts = ctrl.alerts_snapshot();
        assert_eq!(ticks, 3);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(ctrl.store().tick_count(), ticks);
        assert_eq!(ctrl.store().vehicles_version(), version);
        assert!(Arc::ptr_eq(&alerts, &ctrl.alerts_snapshot()));
        assert_eq!(*ctrl.simulator_state().borrow(), SimulatorState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn commands_are_applied_and_published() {
        let ctrl = controller(SimulationConfig {
            alert_probability: 0.0,
            ..SimulationConfig::default()
        });
        ctrl.start().await.unwrap();

        let result = ctrl
            .execute(Command::Acknowledge {
                id: AlertId::from("alert-1"),
            })
            .await
            .unwrap();
        assert_eq!(result, CommandResult::Acknowledged { changed: true });
        assert!(
            ctrl.store()
                .alert_by_id(&AlertId::from("alert-1"))
                .unwrap()
                .acknowledged
        );

        let result = ctrl
            .execute(Command::Acknowledge {
                id: AlertId::from("alert-missing"),
            })
            .await
            .unwrap();
        assert_eq!(result, CommandResult::Acknowledged { changed: false });

        ctrl.execute(Command::AcknowledgeAll).await.unwrap();
        assert!(ctrl.alerts_snapshot().iter().all(|a| a.acknowledged));

        let result = ctrl
            .execute(Command::SelectVehicle {
                id: Some(VehicleId::from("vehicle-4")),
            })
            .await
            .unwrap();
        assert_eq!(
            result,
            CommandResult::Selected(Some(VehicleId::from("vehicle-4")))
        );
        assert_eq!(
            ctrl.store().selected_vehicle().unwrap().name,
            "Sunshine Van 04"
        );

        ctrl.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn lifecycle_is_visible_without_subscribers() {
        let ctrl = controller(SimulationConfig::default());
        assert!(!ctrl.is_running());

        ctrl.start().await.unwrap();
        assert!(ctrl.is_running());
        assert_eq!(*ctrl.simulator_state().borrow(), SimulatorState::Running);

        let result = ctrl.execute(Command::AcknowledgeAll).await.unwrap();
        assert_eq!(result, CommandResult::AcknowledgedAll { count: 5 });

        ctrl.stop().await;
        assert!(!ctrl.is_running());
        assert_eq!(*ctrl.simulator_state().borrow(), SimulatorState::Stopped);
        assert!(matches!(
            ctrl.execute(Command::AcknowledgeAll).await,
            Err(CoreError::SimulatorStopped)
        ));
    }

    #[tokio::test]
    async fn headless_tick_overflow_is_an_error() {
        let far_future = chrono::DateTime::<Utc>::MAX_UTC - chrono::Duration::seconds(7);
        let ctrl = FleetController::with_clock(
            SimulationConfig {
                seed: Some(3),
                alert_probability: 0.0,
                ..SimulationConfig::default()
            },
            FleetSeed::sunshine(t0()),
            Arc::new(ManualClock::new(far_future)),
        )
        .unwrap();

        assert_eq!(ctrl.run_ticks(1).await.unwrap().len(), 1);
        let ticks = ctrl.store().tick_count();

        let err = ctrl.run_ticks(2).await.unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
        assert_eq!(ctrl.store().tick_count(), ticks);
    }

    #[tokio::test]
    async fn execute_requires_running_simulator() {
        let ctrl = controller(SimulationConfig::default());
        let err = ctrl.execute(Command::AcknowledgeAll).await.unwrap_err();
        assert!(matches!(err, CoreError::SimulatorStopped));
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_is_rejected() {
        let ctrl = controller(SimulationConfig::default());
        ctrl.start().await.unwrap();
        assert!(matches!(ctrl.start().await, Err(CoreError::AlreadyRunning)));
        assert!(matches!(ctrl.run_ticks(1).await, Err(CoreError::AlreadyRunning)));
        ctrl.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn remount_starts_from_seed() {
        let ctrl = controller(SimulationConfig::default());
        ctrl.start().await.unwrap();
        ctrl.execute(Command::AcknowledgeAll).await.unwrap();
        ctrl.stop().await;

        ctrl.start().await.unwrap();
        let unacked = ctrl
            .alerts_snapshot()
            .iter()
            .filter(|a| !a.acknowledged)
            .count();
        assert_eq!(unacked, 5);
        ctrl.stop().await;
    }

    #[tokio::test]
    async fn headless_runs_are_reproducible() {
        let config = SimulationConfig {
            seed: Some(77),
            alert_probability: 0.5,
            ..SimulationConfig::default()
        };
        let a = controller(config.clone());
        let b = controller(config);

        let ra = a.run_ticks(25).await.unwrap();
        let rb = b.run_ticks(25).await.unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a.store().tick_count(), 25);
        assert_eq!(a.vehicles_snapshot(), b.vehicles_snapshot());
        assert_eq!(a.alerts_snapshot(), b.alerts_snapshot());
    }

    #[tokio::test]
    async fn headless_ticks_are_stamped_by_interval() {
        let ctrl = controller(SimulationConfig {
            seed: Some(1),
            ..SimulationConfig::default()
        });
        let reports = ctrl.run_ticks(3).await.unwrap();
        assert_eq!(reports[2].at, t0() + chrono::Duration::seconds(15));
        assert_eq!(
            ctrl.store().last_tick(),
            Some(t0() + chrono::Duration::seconds(15))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn raised_alerts_are_broadcast() {
        let ctrl = controller(SimulationConfig {
            alert_probability: 1.0,
            ..SimulationConfig::default()
        });
        let mut rx = ctrl.raised_alerts();
        ctrl.start_with(seeded(9), Arc::new(ManualClock::new(t0())))
            .await
            .unwrap();

        let alert = rx.recv().await.unwrap();
        assert!(!alert.acknowledged);
        assert_eq!(ctrl.alerts_snapshot()[0].id, alert.id);
        ctrl.stop().await;
    }
}
