//! Run-related type definitions
//!
//! Supporting types describing which algorithm ran and how the run ended.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::Error;

/// Sorting algorithm selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
}

impl Algorithm {
    /// Every selectable algorithm, in menu order
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Merge,
        Algorithm::Quick,
    ];

    /// Human-readable menu label ("Bubble Sort")
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Bubble => write!(f, "bubble"),
            Algorithm::Insertion => write!(f, "insertion"),
            Algorithm::Selection => write!(f, "selection"),
            Algorithm::Merge => write!(f, "merge"),
            Algorithm::Quick => write!(f, "quick"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts the short name ("quick"), the label ("Quick Sort") or a
    /// dashed form ("quick-sort"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        let name = normalized
            .strip_suffix(" sort")
            .unwrap_or(&normalized)
            .trim();

        match name {
            "bubble" => Ok(Algorithm::Bubble),
            "insertion" => Ok(Algorithm::Insertion),
            "selection" => Ok(Algorithm::Selection),
            "merge" => Ok(Algorithm::Merge),
            "quick" => Ok(Algorithm::Quick),
            _ => Err(Error::InvalidInput(format!("unknown algorithm: {}", s))),
        }
    }
}

/// How a run ended
///
/// Completed and cancelled runs look identical to the driver ("run finished");
/// the distinction exists for correctness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Completed => write!(f, "completed"),
            RunOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Summary of one finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier (matches the run's `RunStarted` event)
    pub run_id: Uuid,
    /// Algorithm that ran
    pub algorithm: Algorithm,
    /// Array generation the run was scoped to
    pub generation: u64,
    /// Completed or cancelled
    pub outcome: RunOutcome,
    /// Snapshots delivered to `on_step`
    pub steps: u64,
    /// Value comparisons performed
    pub comparisons: u64,
    /// Swaps plus single-element overwrites
    pub writes: u64,
    /// Wall time including time spent paused
    pub elapsed_ms: u64,
}

impl RunReport {
    /// True when the algorithm ran to completion
    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parses_all_spellings() {
        assert_eq!("bubble".parse::<Algorithm>().unwrap(), Algorithm::Bubble);
        assert_eq!("Insertion Sort".parse::<Algorithm>().unwrap(), Algorithm::Insertion);
        assert_eq!("selection-sort".parse::<Algorithm>().unwrap(), Algorithm::Selection);
        assert_eq!("  MERGE ".parse::<Algorithm>().unwrap(), Algorithm::Merge);
        assert_eq!("quick_sort".parse::<Algorithm>().unwrap(), Algorithm::Quick);
    }

    #[test]
    fn test_algorithm_rejects_unknown_name() {
        let err = "bogo".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_algorithm_display_round_trips_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.label().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_algorithm_serializes_lowercase() {
        let json = serde_json::to_string(&Algorithm::Quick).unwrap();
        assert_eq!(json, "\"quick\"");
    }
}
