//! Sort engine
//!
//! **Purpose:** Run one sorting algorithm to completion or cancellation against a
//! shared [`ArrayState`], publishing a snapshot at every step.
//!
//! **Architecture:**
//! - `core`: step context (pacing, publishing, counters)
//! - `quadratic`: bubble, insertion, selection
//! - `divide`: merge, quick
//!
//! **Run lifecycle:**
//! 1. Hold while paused (no mutation happens before the first resume)
//! 2. Algorithm body, one [`Stepper::step`] per observable change
//! 3. Completed runs mark every bar sorted; cancelled runs keep their flags
//! 4. Highlights cleared, run ownership released, closing frame sent to
//!    [`RenderSink::on_finish`]
//!
//! Every algorithm leaves the array a permutation of its starting contents,
//! including when cancelled mid-shift (insertion) or mid-merge.

mod core;
mod divide;
mod quadratic;

use self::core::Stepper;
use crate::pace::{CancelToken, Cancelled, PaceController};
use crate::sink::RenderSink;
use crate::state::{ArrayState, BarValue, RunGuard};
use sortvis_common::{Algorithm, Error, Result, RunOutcome, RunReport};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// Runs algorithms against one array
pub struct SortEngine<T: BarValue = u32> {
    state: Arc<ArrayState<T>>,
    pace: Arc<PaceController>,
    sink: Arc<dyn RenderSink<T>>,
}

impl<T: BarValue> Clone for SortEngine<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            pace: Arc::clone(&self.pace),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<T: BarValue> SortEngine<T> {
    pub fn new(
        state: Arc<ArrayState<T>>,
        pace: Arc<PaceController>,
        sink: Arc<dyn RenderSink<T>>,
    ) -> Self {
        Self { state, pace, sink }
    }

    pub fn state(&self) -> &Arc<ArrayState<T>> {
        &self.state
    }

    /// Claim the array and run `algorithm` on the calling thread
    ///
    /// Fails with `Error::RunActive` if another run owns the array.
    pub fn run(&self, algorithm: Algorithm, token: &CancelToken) -> Result<RunReport> {
        let guard = self.state.try_claim(Uuid::new_v4())?;
        self.run_claimed(guard, algorithm, token)
    }

    /// Run `algorithm` under an ownership guard taken earlier
    ///
    /// The guard is released before the closing frame is published, so a
    /// listener reacting to `on_finish` can start the next run immediately.
    pub fn run_claimed(
        &self,
        guard: RunGuard<T>,
        algorithm: Algorithm,
        token: &CancelToken,
    ) -> Result<RunReport> {
        if !guard.belongs_to(&self.state) {
            return Err(Error::Internal(format!(
                "Run {} holds a guard for a different array",
                guard.run_id()
            )));
        }

        let run_id = guard.run_id();
        let generation = self.state.generation();
        let len = self.state.len();
        let span = info_span!("sort_run", %run_id, %algorithm, generation, len);
        let _enter = span.enter();

        info!("Sort run started");
        self.sink.on_run_started(run_id, algorithm, generation, len);
        let started = Instant::now();

        let mut cx = Stepper::new(&*self.state, &*self.pace, &*self.sink, token);
        let result = self
            .pace
            .wait_while_paused(token)
            .and_then(|()| match algorithm {
                Algorithm::Bubble => quadratic::bubble(&mut cx),
                Algorithm::Insertion => quadratic::insertion(&mut cx),
                Algorithm::Selection => quadratic::selection(&mut cx),
                Algorithm::Merge => divide::merge(&mut cx),
                Algorithm::Quick => divide::quick(&mut cx),
            });

        let outcome = match result {
            Ok(()) => RunOutcome::Completed,
            Err(Cancelled) => RunOutcome::Cancelled,
        };

        let snapshot = {
            let mut bars = self.state.lock();
            if outcome == RunOutcome::Completed {
                bars.mark_all_sorted();
            }
            bars.clear_highlight();
            bars.snapshot()
        };

        let report = RunReport {
            run_id,
            algorithm,
            generation,
            outcome,
            steps: cx.steps,
            comparisons: cx.comparisons,
            writes: cx.writes,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        drop(guard);
        debug!("Run ownership released");
        self.sink.on_finish(&snapshot, &report);

        info!(
            outcome = %report.outcome,
            steps = report.steps,
            comparisons = report.comparisons,
            writes = report.writes,
            elapsed_ms = report.elapsed_ms,
            "Sort run finished"
        );
        Ok(report)
    }
}
