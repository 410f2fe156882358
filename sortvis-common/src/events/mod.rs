//! Event types for the sortvis event system
//!
//! Provides shared event definitions and the EventBus that carries engine
//! output (step snapshots, generation resets, run lifecycle) to renderers.

// Sub-modules (supporting types)
mod display_types;
mod run_types;

pub use display_types::{Orientation, Snapshot};
pub use run_types::{Algorithm, RunOutcome, RunReport};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// sortvis event types
///
/// Events are broadcast via EventBus and can be serialized (JSON lines, logs).
/// All events use this central enum for type safety and exhaustive matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisEvent {
    /// The array was reshuffled or resized (new generation)
    ///
    /// Triggers:
    /// - Renderer: discard cached geometry, redraw from scratch
    /// - Labels: rebuild the `arr[i] = v` list
    Reset {
        /// New generation number
        generation: u64,
        /// Bar count of the new generation
        len: usize,
        /// When the reset happened
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// One observable step of a running sort
    ///
    /// Emitted on the run thread, fire-and-forget. Snapshots arrive in
    /// mutation order; slow subscribers lag rather than stall the run.
    Step {
        /// Array state right after the step
        snapshot: Snapshot<u32>,
    },

    /// A run took ownership of the array
    ///
    /// Triggers:
    /// - UI: disable shuffle/resize/orientation/sort controls
    RunStarted {
        /// Run identifier
        run_id: Uuid,
        /// Algorithm being run
        algorithm: Algorithm,
        /// Generation the run is scoped to
        generation: u64,
        /// Bar count
        len: usize,
        /// When the run started
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A run released the array (completed or cancelled)
    ///
    /// Triggers:
    /// - UI: re-enable controls
    /// - Renderer: draw the closing frame
    RunFinished {
        /// Run summary
        report: RunReport,
        /// Final array state (highlights cleared)
        snapshot: Snapshot<u32>,
        /// When the run finished
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Step delay or pause flag changed
    PaceChanged {
        /// Per-step delay after clamping
        delay_ms: f64,
        /// Whether the engine is held at its next step boundary
        paused: bool,
        /// When the change was applied
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Bar orientation changed
    OrientationChanged {
        /// New orientation
        orientation: Orientation,
        /// When the change was applied
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl VisEvent {
    /// Short event name for logs
    pub fn event_type(&self) -> &'static str {
        match self {
            VisEvent::Reset { .. } => "Reset",
            VisEvent::Step { .. } => "Step",
            VisEvent::RunStarted { .. } => "RunStarted",
            VisEvent::RunFinished { .. } => "RunFinished",
            VisEvent::PaceChanged { .. } => "PaceChanged",
            VisEvent::OrientationChanged { .. } => "OrientationChanged",
        }
    }
}

// ========================================
// EventBus Implementation
// ========================================

/// Central event distribution bus for visualizer events
///
/// The EventBus uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block the sort thread)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
/// - Lagged message detection for slow subscribers
///
/// `emit` is a plain synchronous call, so the sort thread can publish without
/// a runtime; only receivers need async context.
///
/// # Capacity Recommendations
///
/// - Interactive terminal: 1024 (a few seconds of steps at the fastest delay)
/// - Testing: 16-256
///
/// # Examples
///
/// ```
/// use sortvis_common::events::{EventBus, VisEvent};
/// use std::sync::Arc;
///
/// let event_bus = Arc::new(EventBus::new(1024));
///
/// // Subscribe to events
/// let mut rx = event_bus.subscribe();
///
/// // Emit an event
/// event_bus.emit(VisEvent::Reset {
///     generation: 1,
///     len: 60,
///     timestamp: chrono::Utc::now(),
/// }).ok();
///
/// assert!(matches!(rx.try_recv(), Ok(VisEvent::Reset { len: 60, .. })));
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<VisEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before lagging receivers lose old events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<VisEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: VisEvent,
    ) -> Result<usize, broadcast::error::SendError<VisEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    ///
    /// Used for step snapshots: a headless run with no renderer attached is
    /// a normal configuration, not an error.
    pub fn emit_lossy(&self, event: VisEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
