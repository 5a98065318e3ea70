//! Operator command handlers. Every precondition failure is absorbed as a
//! no-op and reported back as [`CommandOutcome::Ignored`].

use chrono::NaiveTime;
use shared::{
    domain::{BoatId, Phase, Scene},
    error::IgnoreReason,
    protocol::{CommandOutcome, FleetCommand},
};
use tracing::debug;

use crate::fleet::{Boat, Fleet};

impl Fleet {
    pub fn apply(&mut self, command: FleetCommand, now: NaiveTime) -> CommandOutcome {
        let outcome = match command {
            FleetCommand::Stop { boat_id } => self.stop(boat_id),
            FleetCommand::Start { boat_id } => self.start(boat_id),
            FleetCommand::StopAll => self.stop_all(),
            FleetCommand::StartAll => self.start_all(),
            FleetCommand::Remove { boat_id } => self.remove(boat_id),
            FleetCommand::Restore {
                boat_id,
                scene,
                phase,
            } => self.restore(boat_id, scene, phase),
            FleetCommand::AssignScene {
                boat_id,
                scene,
                phase,
            } => self.assign_scene(boat_id, scene, phase, now),
        };

        match &outcome {
            CommandOutcome::Applied => debug!(command = command.name(), "command applied"),
            CommandOutcome::Ignored(reason) => {
                debug!(command = command.name(), %reason, "command ignored")
            }
        }
        outcome
    }

    pub fn stop(&mut self, boat_id: BoatId) -> CommandOutcome {
        self.with_active(boat_id, |boat| boat.set_running(false))
    }

    pub fn start(&mut self, boat_id: BoatId) -> CommandOutcome {
        self.with_active(boat_id, |boat| boat.set_running(true))
    }

    pub fn stop_all(&mut self) -> CommandOutcome {
        self.boats_mut()
            .filter(|boat| boat.is_active())
            .for_each(|boat| boat.set_running(false));
        CommandOutcome::Applied
    }

    pub fn start_all(&mut self) -> CommandOutcome {
        self.boats_mut()
            .filter(|boat| boat.is_active())
            .for_each(|boat| boat.set_running(true));
        CommandOutcome::Applied
    }

    /// Idempotent: removing a boat that is already out of service succeeds.
    pub fn remove(&mut self, boat_id: BoatId) -> CommandOutcome {
        match self.boat_mut(boat_id) {
            Some(boat) => {
                boat.take_out_of_service();
                CommandOutcome::Applied
            }
            None => CommandOutcome::Ignored(IgnoreReason::UnknownBoat(boat_id)),
        }
    }

    /// Returns a removed boat to service, stopped, at the chosen position.
    pub fn restore(&mut self, boat_id: BoatId, scene: Scene, phase: Phase) -> CommandOutcome {
        let Some(boat) = self.boat_mut(boat_id) else {
            return CommandOutcome::Ignored(IgnoreReason::UnknownBoat(boat_id));
        };
        if boat.is_active() {
            return CommandOutcome::Ignored(IgnoreReason::AlreadyActive(boat_id));
        }
        boat.return_to_service(scene, phase);
        CommandOutcome::Applied
    }

    /// Moves an in-service boat immediately, bypassing the tick cycle.
    pub fn assign_scene(
        &mut self,
        boat_id: BoatId,
        scene: Scene,
        phase: Phase,
        now: NaiveTime,
    ) -> CommandOutcome {
        self.with_active(boat_id, |boat| boat.relocate(scene, phase, now))
    }

    fn with_active(&mut self, boat_id: BoatId, f: impl FnOnce(&mut Boat)) -> CommandOutcome {
        match self.boat_mut(boat_id) {
            None => CommandOutcome::Ignored(IgnoreReason::UnknownBoat(boat_id)),
            Some(boat) if !boat.is_active() => {
                CommandOutcome::Ignored(IgnoreReason::BoatRemoved(boat_id))
            }
            Some(boat) => {
                f(boat);
                CommandOutcome::Applied
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
