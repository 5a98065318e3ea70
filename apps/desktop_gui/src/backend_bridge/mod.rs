//! Bridge between the UI thread and the backend thread that owns the fleet.

pub mod runtime;
