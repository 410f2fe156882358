//! Visualizer driver
//!
//! Owns the array, the pace controller and the render sink, and turns user
//! controls into engine operations:
//!
//! | Control          | Allowed during a run | Effect                              |
//! |------------------|----------------------|-------------------------------------|
//! | `start`          | no (`RunActive`)     | spawn a sort thread                 |
//! | `cancel`         | yes                  | set the run's cancel token          |
//! | `set_delay`      | yes                  | clamp, apply at next step           |
//! | `set_paused`     | yes                  | hold at next step boundary          |
//! | `resize`         | no (`RunActive`)     | clamp to [10, 200], reshuffle       |
//! | `shuffle`        | no (`RunActive`)     | new generation of random bars       |
//! | `set_orientation`| no (`RunActive`)     | change length range, reshuffle      |
//!
//! Runs execute on a dedicated named thread. Ownership of the array is taken
//! before the thread is spawned and released when the run unwinds, so "is a
//! run active" is answered by the array itself, not by UI state. Controls
//! that replace the array take the same ownership for the duration of the
//! replacement, so a concurrent `start` is rejected rather than racing it.

use crate::engine::SortEngine;
use crate::pace::{CancelToken, PaceController};
use crate::sink::RenderSink;
use crate::state::{ArrayState, RunGuard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sortvis_common::config::VisualizerConfig;
use sortvis_common::params::{self, PaceLimits, Surface};
use sortvis_common::{Algorithm, Error, Orientation, Result, RunReport, Snapshot};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Startup settings for a [`Visualizer`]
#[derive(Debug, Clone)]
pub struct VisualizerOptions {
    /// Initial bar count (clamped)
    pub bar_count: usize,
    /// Initial step delay in ms (clamped by `pace_limits`)
    pub delay_ms: f64,
    /// Initial orientation
    pub orientation: Orientation,
    /// Surface the bar lengths are scaled for
    pub surface: Surface,
    /// Delay bounds and poll cadence
    pub pace_limits: PaceLimits,
    /// Seed for the shuffle RNG; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for VisualizerOptions {
    fn default() -> Self {
        Self {
            bar_count: params::BAR_COUNT_DEFAULT,
            delay_ms: params::DELAY_MS_DEFAULT,
            orientation: Orientation::default(),
            surface: Surface::default(),
            pace_limits: PaceLimits::default(),
            seed: None,
        }
    }
}

impl From<&VisualizerConfig> for VisualizerOptions {
    fn from(config: &VisualizerConfig) -> Self {
        Self {
            bar_count: config.bar_count,
            delay_ms: config.delay_ms,
            orientation: config.orientation,
            pace_limits: PaceLimits::with_poll_interval_ms(config.pause_poll_interval_ms),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
struct ActiveRun {
    run_id: Uuid,
    token: CancelToken,
}

#[derive(Debug)]
struct Controls {
    orientation: Orientation,
    /// Bar count chosen by `new`/`resize`; `load` leaves it alone
    bar_count: usize,
    rng: StdRng,
    active: Option<ActiveRun>,
}

/// Interactive front end over one array
pub struct Visualizer {
    state: Arc<ArrayState>,
    pace: Arc<PaceController>,
    sink: Arc<dyn RenderSink<u32>>,
    surface: Surface,
    controls: Mutex<Controls>,
}

impl Visualizer {
    /// Build a visualizer and generate its first array
    pub fn new(options: VisualizerOptions, sink: Arc<dyn RenderSink<u32>>) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let visualizer = Self {
            state: Arc::new(ArrayState::new()),
            pace: Arc::new(PaceController::new(options.pace_limits, options.delay_ms)),
            sink,
            surface: options.surface,
            controls: Mutex::new(Controls {
                orientation: options.orientation,
                bar_count: params::clamp_bar_count(options.bar_count),
                rng,
                active: None,
            }),
        };

        let mut controls = visualizer.controls();
        let bar_count = controls.bar_count;
        visualizer.regenerate(&mut controls, bar_count);
        drop(controls);

        info!(
            bar_count,
            delay_ms = visualizer.pace.delay_ms(),
            orientation = %options.orientation,
            "Visualizer initialized"
        );
        visualizer
    }

    fn controls(&self) -> MutexGuard<'_, Controls> {
        self.controls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> &Arc<ArrayState> {
        &self.state
    }

    pub fn pace(&self) -> &Arc<PaceController> {
        &self.pace
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn orientation(&self) -> Orientation {
        self.controls().orientation
    }

    pub fn snapshot(&self) -> Snapshot<u32> {
        self.state.snapshot()
    }

    /// Run currently owning the array
    pub fn active_run(&self) -> Option<Uuid> {
        self.state.active_run()
    }

    pub fn is_running(&self) -> bool {
        self.active_run().is_some()
    }

    /// Own the array for a replacement, failing if a run holds it
    fn hold_idle(&self, action: &str) -> Result<RunGuard<u32>> {
        self.state.try_claim(Uuid::new_v4()).map_err(|e| {
            if let Error::RunActive(run_id) = &e {
                warn!(%run_id, "Rejected {} while a sort is running", action);
            }
            e
        })
    }

    /// Start `algorithm` on a background thread
    ///
    /// Rejected with `Error::RunActive` while another run owns the array.
    pub fn start(&self, algorithm: Algorithm) -> Result<RunHandle> {
        let run_id = Uuid::new_v4();
        let guard = self.state.try_claim(run_id).map_err(|e| {
            warn!(%algorithm, "Rejected sort start: {}", e);
            e
        })?;

        let token = CancelToken::new();
        self.controls().active = Some(ActiveRun {
            run_id,
            token: token.clone(),
        });

        let engine = SortEngine::new(
            Arc::clone(&self.state),
            Arc::clone(&self.pace),
            Arc::clone(&self.sink),
        );
        let run_token = token.clone();
        let thread = thread::Builder::new()
            .name(format!("sort-{}", algorithm))
            .spawn(move || engine.run_claimed(guard, algorithm, &run_token))
            .map_err(|e| Error::Internal(format!("Failed to spawn sort thread: {}", e)))?;

        debug!(%run_id, %algorithm, "Sort thread spawned");
        Ok(RunHandle {
            run_id,
            algorithm,
            token,
            thread,
        })
    }

    /// Ask the active run to stop at its next step boundary
    ///
    /// Returns `false` when no run is active.
    pub fn cancel(&self) -> bool {
        let active_run = self.state.active_run();
        let controls = self.controls();
        match (&controls.active, active_run) {
            (Some(active), Some(owner)) if active.run_id == owner => {
                active.token.cancel();
                info!(run_id = %owner, "Cancellation requested");
                true
            }
            _ => {
                debug!("Cancel ignored, no active run");
                false
            }
        }
    }

    /// Set the step delay; returns the clamped value
    pub fn set_delay(&self, delay_ms: f64) -> f64 {
        let applied = self.pace.set_delay(delay_ms);
        self.sink.on_pace_changed(applied, self.pace.is_paused());
        applied
    }

    pub fn set_paused(&self, paused: bool) {
        self.pace.set_paused(paused);
        info!(paused, "Pause toggled");
        self.sink.on_pace_changed(self.pace.delay_ms(), paused);
    }

    /// Flip pause, returning the new state
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.pace.is_paused();
        self.set_paused(paused);
        paused
    }

    /// Change the bar count (clamped) and reshuffle; returns the applied count
    pub fn resize(&self, bar_count: usize) -> Result<usize> {
        let _hold = self.hold_idle("resize")?;
        let bar_count = params::clamp_bar_count(bar_count);
        let mut controls = self.controls();
        controls.bar_count = bar_count;
        self.regenerate(&mut controls, bar_count);
        Ok(bar_count)
    }

    /// New random values for the selected bar count; returns the new generation
    ///
    /// The count is the one last chosen by `new` or `resize`. An array
    /// installed with `load` does not change it, so shuffling after a load
    /// returns to the selected size.
    pub fn shuffle(&self) -> Result<u64> {
        let _hold = self.hold_idle("shuffle")?;
        let mut controls = self.controls();
        let bar_count = controls.bar_count;
        Ok(self.regenerate(&mut controls, bar_count))
    }

    /// Change orientation; the length range changes with it, so reshuffle
    pub fn set_orientation(&self, orientation: Orientation) -> Result<()> {
        let _hold = self.hold_idle("orientation change")?;
        let mut controls = self.controls();
        controls.orientation = orientation;
        self.sink.on_orientation_changed(orientation);
        let bar_count = controls.bar_count;
        self.regenerate(&mut controls, bar_count);
        info!(%orientation, "Orientation changed");
        Ok(())
    }

    /// Replace the array with explicit values (no clamping, new generation)
    pub fn load(&self, values: Vec<u32>) -> Result<u64> {
        let _hold = self.hold_idle("load")?;
        let len = values.len();
        let generation = self.state.load(values);
        self.sink.on_reset(generation, len);
        Ok(generation)
    }

    /// `arr[i] = v` lines for the current array
    pub fn labels(&self) -> Vec<String> {
        crate::render::labels(&self.state.snapshot())
    }

    fn regenerate(&self, controls: &mut Controls, bar_count: usize) -> u64 {
        let range = self.surface.bar_length_range(controls.orientation);
        let rng = &mut controls.rng;
        let generation = self.state.reset(bar_count, |_| rng.gen_range(range.clone()));
        debug!(
            generation,
            bar_count,
            min = *range.start(),
            max = *range.end(),
            "Array regenerated"
        );
        self.sink.on_reset(generation, bar_count);
        generation
    }
}

/// One background sort run
#[derive(Debug)]
pub struct RunHandle {
    run_id: Uuid,
    algorithm: Algorithm,
    token: CancelToken,
    thread: JoinHandle<Result<RunReport>>,
}

impl RunHandle {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Request cancellation (the run stops at its next step boundary)
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the run unwinds
    pub fn join(self) -> Result<RunReport> {
        self.thread
            .join()
            .map_err(|_| Error::Internal(format!("Sort thread for run {} panicked", self.run_id)))?
    }
}
