use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(BoatId);

impl fmt::Display for BoatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Boat {}", self.0)
    }
}

/// A physical zone of the ride. Scenes are visited in declaration order and
/// the loading bay wraps back to the first scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    Scene1,
    Scene2,
    Scene3,
    Scene4,
    Scene5,
    Scene6,
    LoadingBay,
}

impl Scene {
    /// Selector order: Scene 1-6, then the loading bay.
    pub const ALL: [Scene; 7] = [
        Scene::Scene1,
        Scene::Scene2,
        Scene::Scene3,
        Scene::Scene4,
        Scene::Scene5,
        Scene::Scene6,
        Scene::LoadingBay,
    ];

    pub fn ordinal(self) -> usize {
        match self {
            Self::Scene1 => 0,
            Self::Scene2 => 1,
            Self::Scene3 => 2,
            Self::Scene4 => 3,
            Self::Scene5 => 4,
            Self::Scene6 => 5,
            Self::LoadingBay => 6,
        }
    }

    /// Ordinals past the loading bay wrap around.
    pub fn from_ordinal(ordinal: usize) -> Self {
        Self::ALL[ordinal % Self::ALL.len()]
    }

    pub fn next(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Scene1 => "Scene 1",
            Self::Scene2 => "Scene 2",
            Self::Scene3 => "Scene 3",
            Self::Scene4 => "Scene 4",
            Self::Scene5 => "Scene 5",
            Self::Scene6 => "Scene 6",
            Self::LoadingBay => "Loading Bay",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    In,
    End,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Start, Phase::In, Phase::End];
    pub const FIRST: Phase = Phase::Start;

    pub fn ordinal(self) -> usize {
        match self {
            Self::Start => 0,
            Self::In => 1,
            Self::End => 2,
        }
    }

    pub fn from_ordinal(ordinal: usize) -> Self {
        Self::ALL[ordinal % Self::ALL.len()]
    }

    /// `None` once the terminal phase is reached.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::In),
            Self::In => Some(Self::End),
            Self::End => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::In => "In",
            Self::End => "End",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoatStatus {
    OutOfCommission,
    Running,
    Stopped,
}

impl BoatStatus {
    pub fn from_flags(active: bool, running: bool) -> Self {
        if !active {
            Self::OutOfCommission
        } else if running {
            Self::Running
        } else {
            Self::Stopped
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OutOfCommission => "Out of Commission",
            Self::Running => "Running",
            Self::Stopped => "Stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_bay_wraps_to_first_scene() {
        assert_eq!(Scene::Scene6.next(), Scene::LoadingBay);
        assert_eq!(Scene::LoadingBay.next(), Scene::Scene1);
        assert_eq!(Scene::from_ordinal(7), Scene::Scene1);
    }

    #[test]
    fn end_is_the_terminal_phase() {
        assert_eq!(Phase::Start.next(), Some(Phase::In));
        assert_eq!(Phase::In.next(), Some(Phase::End));
        assert_eq!(Phase::End.next(), None);
        assert!(Phase::Start < Phase::End);
    }

    #[test]
    fn inactive_flag_wins_over_running() {
        assert_eq!(BoatStatus::from_flags(false, true), BoatStatus::OutOfCommission);
        assert_eq!(BoatStatus::from_flags(true, false).label(), "Stopped");
    }
}
