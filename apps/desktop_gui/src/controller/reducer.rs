//! Folds backend events into the state the dashboard renders.

use shared::protocol::{BoatSnapshot, CommandOutcome, FleetCommand, FleetEvent};

use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub boats: Vec<BoatSnapshot>,
    /// Ephemeral accent for running boats; never part of the fleet model.
    pub blink_on: bool,
    pub status: String,
    pub banner: Option<UiError>,
    pub ticks: u64,
    /// Commands the fleet absorbed as no-ops.
    pub ignored: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            status: "Waiting for fleet scheduler...".to_string(),
            ..Self::default()
        }
    }

    pub fn reduce(&mut self, event: UiEvent) {
        match event {
            UiEvent::Error(err) => {
                tracing::warn!(context = err.context().label(), "{}", err.message());
                self.banner = Some(err);
            }
            UiEvent::Fleet(FleetEvent::Started { boats }) => {
                self.status = format!("Tracking {} boats", boats.len());
                self.boats = boats;
            }
            UiEvent::Fleet(FleetEvent::Advanced { boats, .. }) => {
                self.ticks += 1;
                self.boats = boats;
            }
            UiEvent::Fleet(FleetEvent::CommandHandled {
                command,
                outcome,
                boats,
            }) => {
                match outcome {
                    CommandOutcome::Applied => self.status = applied_status(&command),
                    CommandOutcome::Ignored(reason) => {
                        self.ignored += 1;
                        tracing::debug!(
                            command = command.name(),
                            boat = %reason.boat_id(),
                            %reason,
                            "operator command ignored"
                        );
                    }
                }
                self.boats = boats;
            }
            UiEvent::Fleet(FleetEvent::BlinkToggled) => self.blink_on = !self.blink_on,
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }
}

fn applied_status(command: &FleetCommand) -> String {
    match *command {
        FleetCommand::Stop { boat_id } => format!("{boat_id} stopped"),
        FleetCommand::Start { boat_id } => format!("{boat_id} started"),
        FleetCommand::StopAll => "Emergency stop: all boats halted".to_string(),
        FleetCommand::StartAll => "All boats started".to_string(),
        FleetCommand::Remove { boat_id } => format!("{boat_id} removed from service"),
        FleetCommand::Restore {
            boat_id,
            scene,
            phase,
        } => format!("{boat_id} restored to {scene} ({phase})"),
        FleetCommand::AssignScene {
            boat_id,
            scene,
            phase,
        } => format!("{boat_id} moved to {scene} ({phase})"),
    }
}
