//! Step context shared by every algorithm
//!
//! A [`Stepper`] binds one run to its array, pace controller, sink and cancel
//! token, and counts what the run does. Algorithms mutate the array through
//! short [`ArrayGuard`] scopes and then call [`Stepper::step`]; the guard must
//! be dropped before stepping, since the snapshot takes the same lock.

use crate::pace::{CancelToken, Cancelled, PaceController, StepResult};
use crate::sink::RenderSink;
use crate::state::{ArrayGuard, ArrayState, BarValue};

pub(crate) struct Stepper<'a, T: BarValue> {
    state: &'a ArrayState<T>,
    pace: &'a PaceController,
    sink: &'a dyn RenderSink<T>,
    token: &'a CancelToken,
    pub(crate) steps: u64,
    pub(crate) comparisons: u64,
    pub(crate) writes: u64,
}

impl<'a, T: BarValue> Stepper<'a, T> {
    pub(crate) fn new(
        state: &'a ArrayState<T>,
        pace: &'a PaceController,
        sink: &'a dyn RenderSink<T>,
        token: &'a CancelToken,
    ) -> Self {
        Self {
            state,
            pace,
            sink,
            token,
            steps: 0,
            comparisons: 0,
            writes: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.state.len()
    }

    /// Lock the array. The guard borrows the array, not the stepper, so
    /// counters can be bumped while it is held.
    pub(crate) fn bars(&self) -> ArrayGuard<'a, T> {
        self.state.lock()
    }

    /// Publish the current state, then wait at the step boundary
    pub(crate) fn step(&mut self) -> StepResult {
        self.publish()?;
        self.pace.await_step(self.token)
    }

    /// Unwind if cancellation was requested since the last boundary
    ///
    /// Needed before mutating after an unpaced [`publish`](Self::publish),
    /// which only checks the token before emitting.
    pub(crate) fn check_cancelled(&self) -> StepResult {
        if self.token.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Publish the current state without pacing
    ///
    /// A cancellation already requested suppresses the publish, so nothing is
    /// emitted after the frame that observed it.
    pub(crate) fn publish(&mut self) -> StepResult {
        if self.token.is_cancelled() {
            return Err(Cancelled);
        }
        let snapshot = self.state.snapshot();
        self.sink.on_step(&snapshot);
        self.steps += 1;
        Ok(())
    }
}
