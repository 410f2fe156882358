//! Parameter metadata definitions
//!
//! Single source of truth for parameter documentation and validation.

use super::ParamMetadata;

impl ParamMetadata {
    /// Get metadata for every driver-facing parameter
    ///
    /// Returns a static reference to the parameter metadata array:
    /// - Parameter names and types
    /// - Default values
    /// - Validation ranges
    /// - Validation logic
    ///
    /// # Example: Validating a Parameter
    ///
    /// ```rust
    /// # use sortvis_common::params::ParamMetadata;
    /// let delay_meta = ParamMetadata::all().iter()
    ///     .find(|m| m.key == "delay_ms")
    ///     .unwrap();
    ///
    /// assert!((delay_meta.validator)("18").is_ok());
    /// assert!((delay_meta.validator)("0.5").is_err());
    /// ```
    pub fn all() -> &'static [ParamMetadata] {
        &[
            ParamMetadata {
                key: "bar_count",
                data_type: "usize",
                default_value: "60",
                description: "Number of bars in the array",
                validation_range: "10-200",
                validator: |s| {
                    let v: usize = s.trim().parse()
                        .map_err(|_| "bar_count: invalid number format".to_string())?;
                    if !(super::BAR_COUNT_MIN..=super::BAR_COUNT_MAX).contains(&v) {
                        return Err(format!("bar_count: value {} out of range [10, 200]", v));
                    }
                    Ok(())
                },
            },

            ParamMetadata {
                key: "delay_ms",
                data_type: "f64",
                default_value: "18",
                description: "Pause after every step in milliseconds (lower is faster)",
                validation_range: "1-50",
                validator: |s| {
                    let v: f64 = s.trim().parse()
                        .map_err(|_| "delay_ms: invalid number format".to_string())?;
                    if !(super::DELAY_MS_MIN..=super::DELAY_MS_MAX).contains(&v) {
                        return Err(format!("delay_ms: value {} out of range [1, 50]", v));
                    }
                    Ok(())
                },
            },

            ParamMetadata {
                key: "algorithm",
                data_type: "Algorithm",
                default_value: "bubble",
                description: "Sorting algorithm run by the sort command",
                validation_range: "bubble|insertion|selection|merge|quick",
                validator: |s| {
                    s.parse::<crate::events::Algorithm>()
                        .map(|_| ())
                        .map_err(|_| format!("algorithm: unknown algorithm '{}'", s.trim()))
                },
            },

            ParamMetadata {
                key: "orientation",
                data_type: "Orientation",
                default_value: "vertical",
                description: "Bar orientation (bar length maps to height or width)",
                validation_range: "vertical|horizontal",
                validator: |s| {
                    s.parse::<crate::events::Orientation>()
                        .map(|_| ())
                        .map_err(|_| format!("orientation: unknown orientation '{}'", s.trim()))
                },
            },

            ParamMetadata {
                key: "pause_poll_interval_ms",
                data_type: "u64",
                default_value: "50",
                description: "How often a paused run re-checks pause and cancel flags",
                validation_range: "1-1000",
                validator: |s| {
                    let v: u64 = s.trim().parse()
                        .map_err(|_| "pause_poll_interval_ms: invalid number format".to_string())?;
                    if !(1..=1000).contains(&v) {
                        return Err(format!("pause_poll_interval_ms: value {} out of range [1, 1000]", v));
                    }
                    Ok(())
                },
            },
        ]
    }
}
