//! Step pacing, pause and cancellation
//!
//! **Purpose:** Hold a running sort at every step boundary for the configured
//! delay, park it while paused, and let it notice cancellation promptly.
//!
//! **Thread model:** The driver thread writes the delay and pause flag; the run
//! thread reads them in [`PaceController::await_step`]. Both live behind one
//! mutex. Cancellation is a separate shared flag ([`CancelToken`]) owned by the
//! run, so a cancelled run never leaks into the next one.
//!
//! **Polling:** While paused the run thread sleeps in `poll_interval` slices,
//! and the per-step delay is sliced the same way, so cancellation is observed
//! within one poll interval even mid-delay.

use sortvis_common::params::{PaceLimits, DELAY_MS_DEFAULT};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Marker returned when a run observes its cancellation flag
///
/// Not an error: it unwinds the algorithm to the engine, which reports the run
/// as cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Result of one step boundary
pub type StepResult = std::result::Result<(), Cancelled>;

/// Cooperative cancellation flag for one run
///
/// Clones share the flag. Once set it stays set.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation (idempotent)
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct PaceState {
    delay_ms: f64,
    paused: bool,
}

/// Per-step delay and pause gate shared by the driver and a run
#[derive(Debug)]
pub struct PaceController {
    limits: PaceLimits,
    state: Mutex<PaceState>,
}

impl Default for PaceController {
    fn default() -> Self {
        Self::new(PaceLimits::default(), DELAY_MS_DEFAULT)
    }
}

impl PaceController {
    /// Create a running (not paused) controller; `delay_ms` is clamped
    pub fn new(limits: PaceLimits, delay_ms: f64) -> Self {
        Self {
            limits,
            state: Mutex::new(PaceState {
                delay_ms: limits.clamp_delay(delay_ms),
                paused: false,
            }),
        }
    }

    /// Zero delay with a short poll interval
    pub fn unthrottled() -> Self {
        Self::new(PaceLimits::unthrottled(), 0.0)
    }

    fn state(&self) -> MutexGuard<'_, PaceState> {
        // PaceState is two plain fields; a poisoned lock still holds valid data
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn limits(&self) -> PaceLimits {
        self.limits
    }

    /// Set the per-step delay, returning the clamped value actually applied
    ///
    /// Takes effect at the next step boundary.
    pub fn set_delay(&self, delay_ms: f64) -> f64 {
        let clamped = self.limits.clamp_delay(delay_ms);
        self.state().delay_ms = clamped;
        debug!(delay_ms = clamped, "Step delay updated");
        clamped
    }

    pub fn delay_ms(&self) -> f64 {
        self.state().delay_ms
    }

    /// Hold (or release) a run at its next step boundary
    pub fn set_paused(&self, paused: bool) {
        self.state().paused = paused;
        debug!(paused, "Pause flag updated");
    }

    pub fn is_paused(&self) -> bool {
        self.state().paused
    }

    /// Flip the pause flag, returning the new value
    pub fn toggle_paused(&self) -> bool {
        let mut state = self.state();
        state.paused = !state.paused;
        state.paused
    }

    /// Block while paused, without the per-step delay
    ///
    /// The engine calls this once before an algorithm's first mutation, so a
    /// run started while paused leaves the array untouched until resumed.
    pub fn wait_while_paused(&self, token: &CancelToken) -> StepResult {
        while self.is_paused() {
            if token.is_cancelled() {
                return Err(Cancelled);
            }
            thread::sleep(self.limits.poll_interval);
        }
        if token.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Step boundary: wait out pause, then the delay
    ///
    /// Returns `Err(Cancelled)` as soon as the token is observed set, whether
    /// while paused, mid-delay, or right after the delay.
    pub fn await_step(&self, token: &CancelToken) -> StepResult {
        self.wait_while_paused(token)?;

        let delay_ms = self.delay_ms();
        if delay_ms > 0.0 {
            let deadline = Instant::now() + Duration::from_secs_f64(delay_ms / 1000.0);
            loop {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                thread::sleep((deadline - now).min(self.limits.poll_interval));
                if token.is_cancelled() {
                    return Err(Cancelled);
                }
            }
        }

        if token.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}
