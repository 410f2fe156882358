//! Test helper modules for sortvis-engine integration tests
//!
//! Provides reusable test infrastructure components:
//! - RecordingSink: capture every snapshot and lifecycle notification
//! - CancelAtStep: cancel a run from inside its own step stream
//! - Array fixtures: seeded random arrays, multisets, key-only-ordered values

#![allow(dead_code)]

pub mod fixtures;
pub mod recording_sink;

// Re-export commonly used types
pub use fixtures::{engine_for, multiset, seeded_values, Tagged};
pub use recording_sink::{CancelAtStep, RecordingSink};
