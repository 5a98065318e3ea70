//! Boat registry and the per-tick state machine.

use chrono::NaiveTime;
use shared::{
    domain::{BoatId, BoatStatus, Phase, Scene},
    protocol::{BoatSnapshot, HistoryEntry, ManualAction},
};
use tracing::debug;

/// Boats per scene when the fleet is first laid out.
const BOATS_PER_SCENE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boat {
    id: BoatId,
    scene: Scene,
    phase: Phase,
    active: bool,
    running: bool,
    history: Vec<HistoryEntry>,
}

impl Boat {
    /// Lays boats out three per scene, one per phase, in id order.
    pub fn new(id: BoatId) -> Self {
        let offset = usize::try_from(id.0.saturating_sub(1)).unwrap_or_default();
        Self {
            id,
            scene: Scene::from_ordinal(offset / BOATS_PER_SCENE),
            phase: Phase::from_ordinal(offset % BOATS_PER_SCENE),
            active: true,
            running: true,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> BoatId {
        self.id
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> BoatStatus {
        BoatStatus::from_flags(self.active, self.running)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn snapshot(&self) -> BoatSnapshot {
        BoatSnapshot {
            boat_id: self.id,
            scene: self.scene,
            phase: self.phase,
            active: self.active,
            running: self.running,
            history: self.history.clone(),
        }
    }

    /// One step of the scene/phase cycle. Returns `false` for boats that
    /// are out of commission or stopped.
    fn advance(&mut self, now: NaiveTime) -> bool {
        if !(self.active && self.running) {
            return false;
        }
        match self.phase.next() {
            Some(phase) => self.phase = phase,
            None => {
                self.phase = Phase::FIRST;
                self.scene = self.scene.next();
            }
        }
        self.log_movement(now);
        true
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running && self.active;
    }

    pub(crate) fn take_out_of_service(&mut self) {
        self.active = false;
        self.running = false;
    }

    pub(crate) fn return_to_service(&mut self, scene: Scene, phase: Phase) {
        self.active = true;
        self.running = false;
        self.scene = scene;
        self.phase = phase;
        self.history.push(HistoryEntry::Manual {
            action: ManualAction::Restored,
        });
    }

    pub(crate) fn relocate(&mut self, scene: Scene, phase: Phase, now: NaiveTime) {
        self.scene = scene;
        self.phase = phase;
        self.log_movement(now);
    }

    fn log_movement(&mut self, at: NaiveTime) {
        self.history.push(HistoryEntry::Movement {
            at,
            phase: self.phase,
            scene: self.scene,
        });
    }
}

/// The fleet registry. Boats are created once, addressed by id `1..=len`
/// and never deleted; removal only takes a boat out of service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    boats: Vec<Boat>,
}

impl Fleet {
    pub fn new(size: usize) -> Self {
        let boats = (1..=size as i64).map(|id| Boat::new(BoatId(id))).collect();
        Self { boats }
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    pub fn boats(&self) -> &[Boat] {
        &self.boats
    }

    pub fn boat(&self, id: BoatId) -> Option<&Boat> {
        Self::index_of(id).and_then(|index| self.boats.get(index))
    }

    pub(crate) fn boat_mut(&mut self, id: BoatId) -> Option<&mut Boat> {
        Self::index_of(id).and_then(|index| self.boats.get_mut(index))
    }

    pub(crate) fn boats_mut(&mut self) -> impl Iterator<Item = &mut Boat> {
        self.boats.iter_mut()
    }

    fn index_of(id: BoatId) -> Option<usize> {
        usize::try_from(id.0).ok()?.checked_sub(1)
    }

    /// Moves every running, in-service boat one step and stamps its history
    /// with `now`. Returns the ids of the boats that moved.
    pub fn advance(&mut self, now: NaiveTime) -> Vec<BoatId> {
        let moved = self
            .boats
            .iter_mut()
            .filter_map(|boat| boat.advance(now).then_some(boat.id))
            .collect::<Vec<_>>();
        debug!(moved = moved.len(), "fleet advanced");
        moved
    }

    pub fn snapshot(&self) -> Vec<BoatSnapshot> {
        self.boats.iter().map(Boat::snapshot).collect()
    }
}

#[cfg(test)]
#[path = "tests/fleet_tests.rs"]
mod tests;
