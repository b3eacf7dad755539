// ── Command API ──
//
// User-triggered mutations flow through a single `Command` enum. The
// controller task applies them between ticks, so a command never lands
// in the middle of a telemetry update.

use crate::error::CoreError;
use crate::model::{AlertId, VehicleId};
use crate::simulator::FleetState;

/// A command envelope sent through the command channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// Every user action the fleet view supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mark one alert acknowledged. Unknown ids are a no-op.
    Acknowledge { id: AlertId },
    AcknowledgeAll,
    /// Point the inspector at a vehicle, or clear it with `None`.
    SelectVehicle { id: Option<VehicleId> },
}

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// `changed` is false when the id was unknown or already acknowledged.
    Acknowledged { changed: bool },
    AcknowledgedAll { count: usize },
    Selected(Option<VehicleId>),
}

/// Apply a command to the owned state.
pub(crate) fn apply(state: &mut FleetState, command: Command) -> CommandResult {
    match command {
        Command::Acknowledge { id } => CommandResult::Acknowledged {
            changed: state.acknowledge(&id),
        },
        Command::AcknowledgeAll => CommandResult::AcknowledgedAll {
            count: state.acknowledge_all(),
        },
        Command::SelectVehicle { id } => {
            CommandResult::Selected(state.select_vehicle(id.as_ref()).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::FleetSeed;
    use chrono::Utc;

    #[test]
    fn apply_routes_each_command() {
        let mut state = FleetState::from_seed(&FleetSeed::sunshine(Utc::now()), 20);

        assert_eq!(
            apply(
                &mut state,
                Command::Acknowledge {
                    id: AlertId::from("alert-3")
                }
            ),
            CommandResult::Acknowledged { changed: true }
        );
        assert_eq!(
            apply(&mut state, Command::AcknowledgeAll),
            CommandResult::AcknowledgedAll { count: 4 }
        );
        assert_eq!(
            apply(
                &mut state,
                Command::SelectVehicle {
                    id: Some(VehicleId::from("vehicle-8"))
                }
            ),
            CommandResult::Selected(Some(VehicleId::from("vehicle-8")))
        );
    }
}
