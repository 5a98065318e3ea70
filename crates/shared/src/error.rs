use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::BoatId;

/// Why an operator command left the fleet untouched. These are not failures:
/// the command is absorbed as a no-op and only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "reason", content = "boat_id", rename_all = "snake_case")]
pub enum IgnoreReason {
    #[error("{0} is not part of the fleet")]
    UnknownBoat(BoatId),
    #[error("{0} is out of commission")]
    BoatRemoved(BoatId),
    #[error("{0} is already in service")]
    AlreadyActive(BoatId),
}

impl IgnoreReason {
    pub fn boat_id(&self) -> BoatId {
        match *self {
            Self::UnknownBoat(id) | Self::BoatRemoved(id) | Self::AlreadyActive(id) => id,
        }
    }
}
