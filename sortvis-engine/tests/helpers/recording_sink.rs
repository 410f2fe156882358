//! Render sinks that record what a run published

use sortvis_common::{Algorithm, Orientation, RunReport, Snapshot};
use sortvis_engine::{CancelToken, RenderSink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Everything a sink was told, in order
pub struct RecordingSink<T = u32> {
    steps: Mutex<Vec<Snapshot<T>>>,
    resets: Mutex<Vec<(u64, usize)>>,
    started: Mutex<Vec<(Uuid, Algorithm)>>,
    finished: Mutex<Vec<(Snapshot<T>, RunReport)>>,
    pace_changes: Mutex<Vec<(f64, bool)>>,
    orientations: Mutex<Vec<Orientation>>,
}

impl<T> Default for RecordingSink<T> {
    fn default() -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            resets: Mutex::new(Vec::new()),
            started: Mutex::new(Vec::new()),
            finished: Mutex::new(Vec::new()),
            pace_changes: Mutex::new(Vec::new()),
            orientations: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> RecordingSink<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> Vec<Snapshot<T>> {
        self.steps.lock().unwrap().clone()
    }

    pub fn step_count(&self) -> usize {
        self.steps.lock().unwrap().len()
    }

    pub fn resets(&self) -> Vec<(u64, usize)> {
        self.resets.lock().unwrap().clone()
    }

    pub fn started(&self) -> Vec<(Uuid, Algorithm)> {
        self.started.lock().unwrap().clone()
    }

    pub fn finished(&self) -> Vec<(Snapshot<T>, RunReport)> {
        self.finished.lock().unwrap().clone()
    }

    pub fn last_finish(&self) -> Option<(Snapshot<T>, RunReport)> {
        self.finished.lock().unwrap().last().cloned()
    }

    pub fn pace_changes(&self) -> Vec<(f64, bool)> {
        self.pace_changes.lock().unwrap().clone()
    }

    pub fn orientations(&self) -> Vec<Orientation> {
        self.orientations.lock().unwrap().clone()
    }
}

impl<T: Clone + Send + Sync> RenderSink<T> for RecordingSink<T> {
    fn on_step(&self, snapshot: &Snapshot<T>) {
        self.steps.lock().unwrap().push(snapshot.clone());
    }

    fn on_reset(&self, generation: u64, len: usize) {
        self.resets.lock().unwrap().push((generation, len));
    }

    fn on_run_started(&self, run_id: Uuid, algorithm: Algorithm, _generation: u64, _len: usize) {
        self.started.lock().unwrap().push((run_id, algorithm));
    }

    fn on_finish(&self, snapshot: &Snapshot<T>, report: &RunReport) {
        self.finished
            .lock()
            .unwrap()
            .push((snapshot.clone(), report.clone()));
    }

    fn on_pace_changed(&self, delay_ms: f64, paused: bool) {
        self.pace_changes.lock().unwrap().push((delay_ms, paused));
    }

    fn on_orientation_changed(&self, orientation: Orientation) {
        self.orientations.lock().unwrap().push(orientation);
    }
}

/// Cancels its token when the `at`-th step (1-based) is published
///
/// The run observes the flag at that same step boundary.
pub struct CancelAtStep {
    at: usize,
    seen: AtomicUsize,
    token: CancelToken,
}

impl CancelAtStep {
    pub fn new(at: usize, token: CancelToken) -> Self {
        Self {
            at,
            seen: AtomicUsize::new(0),
            token,
        }
    }

    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }
}

impl<T> RenderSink<T> for CancelAtStep {
    fn on_step(&self, _snapshot: &Snapshot<T>) {
        let seen = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
        if seen == self.at {
            self.token.cancel();
        }
    }

    fn on_reset(&self, _generation: u64, _len: usize) {}
}
