//! UI layer for the ride dashboard: app shell and display projection.

pub mod app;
pub mod display;

pub use app::RideControlApp;
