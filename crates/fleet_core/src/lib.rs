//! Ride fleet registry, operator commands and the tick scheduler that drives
//! them. Nothing in here knows about rendering.

pub mod commands;
pub mod config;
pub mod fleet;
pub mod scheduler;

pub use config::{load_settings, load_settings_from, ConfigError, RideSettings};
pub use fleet::{Boat, Fleet};
pub use scheduler::{
    command_channel, Clock, FixedClock, FleetObserver, FleetScheduler, LocalClock,
};
