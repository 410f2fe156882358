//! Visualizer parameter limits, defaults and clamping
//!
//! Single source of truth for every tunable the driver exposes:
//! - Bar count range [10, 200], default 60
//! - Step delay range [1, 50] ms, default 18 (lower = faster)
//! - Pause poll interval (50 ms)
//! - Rendering surface geometry used to derive bar lengths
//!
//! # Clamping Policy
//!
//! Out-of-range bar counts and delays are clamped, never rejected. Every clamp
//! that changes the value logs a warning so misconfiguration stays visible.
//!
//! # Usage
//!
//! ```rust
//! use sortvis_common::params::{clamp_bar_count, PaceLimits};
//!
//! assert_eq!(clamp_bar_count(500), 200);
//! assert_eq!(PaceLimits::default().clamp_delay(0.2), 1.0);
//! ```

use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::warn;

use crate::events::Orientation;
use crate::{Error, Result};

// Module declarations
mod metadata;

/// Smallest selectable bar count
pub const BAR_COUNT_MIN: usize = 10;

/// Largest selectable bar count
pub const BAR_COUNT_MAX: usize = 200;

/// Bar count on startup
pub const BAR_COUNT_DEFAULT: usize = 60;

/// Fastest step delay (ms)
pub const DELAY_MS_MIN: f64 = 1.0;

/// Slowest step delay (ms)
pub const DELAY_MS_MAX: f64 = 50.0;

/// Step delay on startup (ms)
pub const DELAY_MS_DEFAULT: f64 = 18.0;

/// How often a paused run re-checks the pause and cancel flags (ms)
pub const PAUSE_POLL_INTERVAL_MS: u64 = 50;

/// Shortest configurable pause poll interval (ms)
pub const PAUSE_POLL_INTERVAL_MS_MIN: u64 = 1;

/// Longest configurable pause poll interval (ms)
pub const PAUSE_POLL_INTERVAL_MS_MAX: u64 = 1000;

/// Default event bus capacity for interactive use
pub const EVENT_BUS_CAPACITY: usize = 1024;

/// Shortest bar length ever generated
pub const BAR_LENGTH_FLOOR: u32 = 3;

/// Shortest generated bar is `max / BAR_LENGTH_DIVISOR` (but at least the floor)
pub const BAR_LENGTH_DIVISOR: u32 = 15;

/// Metadata for a single visualizer parameter
///
/// Encapsulates the parameter's documentation and its strict validator.
/// The validator reports out-of-range values as errors; callers that follow
/// the clamping policy use the `clamp_*` helpers instead.
///
/// # Validator Closure Signature
///
/// All validators must have signature: `fn(&str) -> Result<(), String>`
///
/// **Error Format Standard:** `"{param_name}: {specific_reason}"`
///
/// # Example
///
/// ```rust
/// # use sortvis_common::params::ParamMetadata;
/// let meta = ParamMetadata::find("bar_count").unwrap();
///
/// assert!(meta.validate("60").is_ok());
/// assert!(meta.validate("500").is_err());
/// ```
pub struct ParamMetadata {
    pub key: &'static str,
    pub data_type: &'static str,
    pub default_value: &'static str,
    pub description: &'static str,
    pub validation_range: &'static str,
    pub validator: fn(&str) -> std::result::Result<(), String>,
}

impl ParamMetadata {
    /// Look up a parameter by key
    pub fn find(key: &str) -> Option<&'static ParamMetadata> {
        Self::all().iter().find(|m| m.key == key)
    }

    /// Run the strict validator, mapping failures to `InvalidConfiguration`
    pub fn validate(&self, value: &str) -> Result<()> {
        (self.validator)(value).map_err(Error::InvalidConfiguration)
    }
}

impl std::fmt::Debug for ParamMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamMetadata")
            .field("key", &self.key)
            .field("data_type", &self.data_type)
            .field("default_value", &self.default_value)
            .field("validation_range", &self.validation_range)
            .finish()
    }
}

/// Delay bounds and poll cadence for a pace controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceLimits {
    /// Lower delay bound (ms)
    pub min_delay_ms: f64,
    /// Upper delay bound (ms)
    pub max_delay_ms: f64,
    /// Pause/cancel poll interval
    pub poll_interval: Duration,
}

impl Default for PaceLimits {
    fn default() -> Self {
        Self {
            min_delay_ms: DELAY_MS_MIN,
            max_delay_ms: DELAY_MS_MAX,
            poll_interval: Duration::from_millis(PAUSE_POLL_INTERVAL_MS),
        }
    }
}

impl PaceLimits {
    /// Limits that allow a zero delay, for tests and benchmarks
    ///
    /// Pause and cancellation still work; only the per-step sleep disappears.
    pub fn unthrottled() -> Self {
        Self {
            min_delay_ms: 0.0,
            max_delay_ms: DELAY_MS_MAX,
            poll_interval: Duration::from_millis(5),
        }
    }

    /// Default delay bounds with a configured poll interval (clamped)
    pub fn with_poll_interval_ms(poll_ms: u64) -> Self {
        Self {
            poll_interval: Duration::from_millis(clamp_poll_interval_ms(poll_ms)),
            ..Self::default()
        }
    }

    /// Clamp a requested delay into `[min_delay_ms, max_delay_ms]`
    ///
    /// NaN maps to the lower bound.
    pub fn clamp_delay(&self, delay_ms: f64) -> f64 {
        if delay_ms.is_nan() {
            warn!("Step delay NaN replaced with {} ms", self.min_delay_ms);
            return self.min_delay_ms;
        }
        let clamped = delay_ms.clamp(self.min_delay_ms, self.max_delay_ms);
        if clamped != delay_ms {
            warn!(
                "Step delay {} ms out of range [{}, {}], clamped to {} ms",
                delay_ms, self.min_delay_ms, self.max_delay_ms, clamped
            );
        }
        clamped
    }
}

/// Clamp a requested bar count into `[BAR_COUNT_MIN, BAR_COUNT_MAX]`
pub fn clamp_bar_count(count: usize) -> usize {
    let clamped = count.clamp(BAR_COUNT_MIN, BAR_COUNT_MAX);
    if clamped != count {
        warn!(
            "Bar count {} out of range [{}, {}], clamped to {}",
            count, BAR_COUNT_MIN, BAR_COUNT_MAX, clamped
        );
    }
    clamped
}

/// Clamp a pause poll interval into `[PAUSE_POLL_INTERVAL_MS_MIN, PAUSE_POLL_INTERVAL_MS_MAX]`
pub fn clamp_poll_interval_ms(poll_ms: u64) -> u64 {
    let clamped = poll_ms.clamp(PAUSE_POLL_INTERVAL_MS_MIN, PAUSE_POLL_INTERVAL_MS_MAX);
    if clamped != poll_ms {
        warn!(
            "Pause poll interval {} ms out of range [{}, {}], clamped to {} ms",
            poll_ms, PAUSE_POLL_INTERVAL_MS_MIN, PAUSE_POLL_INTERVAL_MS_MAX, clamped
        );
    }
    clamped
}

/// Parse a bar count from user text, then clamp it
///
/// Malformed text is an error; out-of-range numbers are clamped.
pub fn parse_bar_count(text: &str) -> Result<usize> {
    let count: usize = text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("bar_count: invalid number '{}'", text)))?;
    Ok(clamp_bar_count(count))
}

/// Parse a step delay from user text (clamping is left to the pace controller)
pub fn parse_delay_ms(text: &str) -> Result<f64> {
    let delay: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("delay_ms: invalid number '{}'", text)))?;
    if !delay.is_finite() {
        return Err(Error::InvalidInput(format!("delay_ms: not a finite number '{}'", text)));
    }
    Ok(delay)
}

/// Rendering surface the bar lengths are scaled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Space left free at the far end of the primary dimension
    pub margin: u32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 20,
        }
    }
}

impl Surface {
    /// Range bar lengths are drawn from for the given orientation
    ///
    /// The primary dimension is the height for vertical bars and the width
    /// for horizontal bars. `max = primary - margin`,
    /// `min = max(BAR_LENGTH_FLOOR, max / BAR_LENGTH_DIVISOR)`.
    pub fn bar_length_range(&self, orientation: Orientation) -> RangeInclusive<u32> {
        let primary = match orientation {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        };
        let max = primary.saturating_sub(self.margin).max(BAR_LENGTH_FLOOR);
        let min = (max / BAR_LENGTH_DIVISOR).max(BAR_LENGTH_FLOOR);
        min..=max
    }
}
