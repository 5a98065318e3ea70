use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{BoatId, BoatStatus, Phase, Scene},
    error::IgnoreReason,
};

/// Operator commands. Each one targets the fleet as a whole or a single
/// selected boat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FleetCommand {
    Stop {
        boat_id: BoatId,
    },
    Start {
        boat_id: BoatId,
    },
    StopAll,
    StartAll,
    Remove {
        boat_id: BoatId,
    },
    Restore {
        boat_id: BoatId,
        scene: Scene,
        phase: Phase,
    },
    AssignScene {
        boat_id: BoatId,
        scene: Scene,
        phase: Phase,
    },
}

impl FleetCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stop { .. } => "stop",
            Self::Start { .. } => "start",
            Self::StopAll => "stop_all",
            Self::StartAll => "start_all",
            Self::Remove { .. } => "remove",
            Self::Restore { .. } => "restore",
            Self::AssignScene { .. } => "assign_scene",
        }
    }

    pub fn boat_id(&self) -> Option<BoatId> {
        match *self {
            Self::Stop { boat_id }
            | Self::Start { boat_id }
            | Self::Remove { boat_id }
            | Self::Restore { boat_id, .. }
            | Self::AssignScene { boat_id, .. } => Some(boat_id),
            Self::StopAll | Self::StartAll => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualAction {
    Restored,
}

/// One line of a boat's movement log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    Movement {
        at: NaiveTime,
        phase: Phase,
        scene: Scene,
    },
    Manual {
        action: ManualAction,
    },
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movement { at, phase, scene } => {
                write!(f, "[{}] {phase} - {scene}", at.format("%H:%M:%S"))
            }
            Self::Manual {
                action: ManualAction::Restored,
            } => f.write_str("[Manual] Restored to system"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatSnapshot {
    pub boat_id: BoatId,
    pub scene: Scene,
    pub phase: Phase,
    pub active: bool,
    pub running: bool,
    pub history: Vec<HistoryEntry>,
}

impl BoatSnapshot {
    pub fn status(&self) -> BoatStatus {
        BoatStatus::from_flags(self.active, self.running)
    }

    /// Up to `limit` most recent history entries, oldest first.
    pub fn recent_history(&self, limit: usize) -> &[HistoryEntry] {
        let start = self.history.len().saturating_sub(limit);
        &self.history[start..]
    }
}

/// Notifications published by the tick scheduler to its observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FleetEvent {
    Started {
        boats: Vec<BoatSnapshot>,
    },
    Advanced {
        moved: Vec<BoatId>,
        boats: Vec<BoatSnapshot>,
    },
    CommandHandled {
        command: FleetCommand,
        outcome: CommandOutcome,
        boats: Vec<BoatSnapshot>,
    },
    BlinkToggled,
}
