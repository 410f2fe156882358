//! Render sinks
//!
//! A [`RenderSink`] receives snapshots from the run thread and lifecycle
//! notifications from the driver. Calls are fire-and-forget: a sink must not
//! block the caller, and anything slow (drawing, terminal I/O) belongs on the
//! far side of a queue. The [`EventBus`] implementation is that queue.

use sortvis_common::{Algorithm, EventBus, Orientation, RunReport, Snapshot, VisEvent};
use std::sync::Arc;
use uuid::Uuid;

/// Consumer of array snapshots and run lifecycle notifications
///
/// `on_step` is called once per observable step, in mutation order, from the
/// run thread. Everything else is optional.
pub trait RenderSink<T = u32>: Send + Sync {
    /// One observable step of a running sort
    fn on_step(&self, snapshot: &Snapshot<T>);

    /// The array was regenerated (new generation, `len` bars)
    fn on_reset(&self, generation: u64, len: usize);

    /// A run took ownership of the array
    fn on_run_started(&self, _run_id: Uuid, _algorithm: Algorithm, _generation: u64, _len: usize) {}

    /// A run released the array; `snapshot` is its closing frame
    fn on_finish(&self, _snapshot: &Snapshot<T>, _report: &RunReport) {}

    /// Delay or pause changed
    fn on_pace_changed(&self, _delay_ms: f64, _paused: bool) {}

    /// Orientation changed
    fn on_orientation_changed(&self, _orientation: Orientation) {}
}

impl<T, S> RenderSink<T> for Arc<S>
where
    S: RenderSink<T> + ?Sized,
{
    fn on_step(&self, snapshot: &Snapshot<T>) {
        (**self).on_step(snapshot)
    }

    fn on_reset(&self, generation: u64, len: usize) {
        (**self).on_reset(generation, len)
    }

    fn on_run_started(&self, run_id: Uuid, algorithm: Algorithm, generation: u64, len: usize) {
        (**self).on_run_started(run_id, algorithm, generation, len)
    }

    fn on_finish(&self, snapshot: &Snapshot<T>, report: &RunReport) {
        (**self).on_finish(snapshot, report)
    }

    fn on_pace_changed(&self, delay_ms: f64, paused: bool) {
        (**self).on_pace_changed(delay_ms, paused)
    }

    fn on_orientation_changed(&self, orientation: Orientation) {
        (**self).on_orientation_changed(orientation)
    }
}

/// Sink that drops everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl<T> RenderSink<T> for NullSink {
    fn on_step(&self, _snapshot: &Snapshot<T>) {}

    fn on_reset(&self, _generation: u64, _len: usize) {}
}

// Broadcast every notification as a VisEvent. Lossy: a run with no subscriber
// attached is normal, and lagging subscribers skip frames instead of stalling
// the run thread.
impl RenderSink<u32> for EventBus {
    fn on_step(&self, snapshot: &Snapshot<u32>) {
        self.emit_lossy(VisEvent::Step {
            snapshot: snapshot.clone(),
        });
    }

    fn on_reset(&self, generation: u64, len: usize) {
        self.emit_lossy(VisEvent::Reset {
            generation,
            len,
            timestamp: chrono::Utc::now(),
        });
    }

    fn on_run_started(&self, run_id: Uuid, algorithm: Algorithm, generation: u64, len: usize) {
        self.emit_lossy(VisEvent::RunStarted {
            run_id,
            algorithm,
            generation,
            len,
            timestamp: chrono::Utc::now(),
        });
    }

    fn on_finish(&self, snapshot: &Snapshot<u32>, report: &RunReport) {
        self.emit_lossy(VisEvent::RunFinished {
            report: report.clone(),
            snapshot: snapshot.clone(),
            timestamp: chrono::Utc::now(),
        });
    }

    fn on_pace_changed(&self, delay_ms: f64, paused: bool) {
        self.emit_lossy(VisEvent::PaceChanged {
            delay_ms,
            paused,
            timestamp: chrono::Utc::now(),
        });
    }

    fn on_orientation_changed(&self, orientation: Orientation) {
        self.emit_lossy(VisEvent::OrientationChanged {
            orientation,
            timestamp: chrono::Utc::now(),
        });
    }
}
