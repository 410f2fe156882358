//! # sortvis Engine Library (sortvis-engine)
//!
//! Instrumented sorting engine with step pacing and cooperative cancellation.
//!
//! **Purpose:** Run bubble, insertion, selection, merge and quick sort against a
//! shared array one observable step at a time, publishing a snapshot per step
//! so a renderer can animate the run.
//!
//! **Architecture:** `ArrayState` (one mutex) shared between a driver
//! (`Visualizer`) and at most one run thread (`SortEngine`), paced by a
//! `PaceController`, observed through a `RenderSink`.

pub mod command;
pub mod driver;
pub mod engine;
pub mod pace;
pub mod render;
pub mod sink;
pub mod state;

pub use driver::{RunHandle, Visualizer, VisualizerOptions};
pub use engine::SortEngine;
pub use pace::{CancelToken, Cancelled, PaceController};
pub use sink::{NullSink, RenderSink};
pub use sortvis_common::{Error, Result};
pub use state::{ArrayState, BarValue, RunGuard};
