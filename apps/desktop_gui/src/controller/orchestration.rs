//! Command orchestration from UI actions to the fleet scheduler queue.

use shared::protocol::FleetCommand;
use tokio::sync::mpsc::{error::TrySendError, Sender};

use crate::controller::events::{UiError, UiErrorContext};

/// Queues `cmd` without blocking the frame. Queue failures come back as a
/// UI error; precondition failures are the scheduler's concern.
pub fn dispatch_fleet_command(
    cmd_tx: &Sender<FleetCommand>,
    cmd: FleetCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->fleet command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(UiError::from_message(
            UiErrorContext::CommandQueue,
            "Fleet command queue is full; please retry",
        )),
        Err(TrySendError::Closed(_)) => Err(UiError::from_message(
            UiErrorContext::CommandQueue,
            "Fleet scheduler stopped (possible startup/runtime failure); restart the dashboard",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::BoatId;
    use tokio::sync::mpsc;

    #[test]
    fn queues_command_for_scheduler() {
        let (tx, mut rx) = mpsc::channel(4);

        dispatch_fleet_command(&tx, FleetCommand::Stop { boat_id: BoatId(3) }).expect("queued");

        assert_eq!(
            rx.try_recv().expect("command"),
            FleetCommand::Stop { boat_id: BoatId(3) }
        );
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = mpsc::channel(1);
        dispatch_fleet_command(&tx, FleetCommand::StopAll).expect("first fits");

        let err = dispatch_fleet_command(&tx, FleetCommand::StartAll).expect_err("full");
        assert_eq!(err.context(), UiErrorContext::CommandQueue);
        assert!(err.message().contains("full"));
    }

    #[test]
    fn reports_stopped_scheduler() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let err = dispatch_fleet_command(&tx, FleetCommand::StopAll).expect_err("closed");
        assert!(err.message().contains("scheduler stopped"));
    }
}
