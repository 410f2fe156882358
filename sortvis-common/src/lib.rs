//! # sortvis Common Library
//!
//! Shared code for the sortvis engine and driver:
//! - Error taxonomy
//! - Event types (`VisEvent`) and the broadcast `EventBus`
//! - Value types shared by engine, driver and renderers (`Snapshot`, `Algorithm`, ...)
//! - Parameter limits, defaults and clamping
//! - TOML configuration loading

pub mod config;
pub mod error;
pub mod events;
pub mod params;

pub use error::{Error, Result};
pub use events::{Algorithm, EventBus, Orientation, RunOutcome, RunReport, Snapshot, VisEvent};
