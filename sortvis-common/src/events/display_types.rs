//! Display-facing type definitions
//!
//! `Snapshot` is the immutable view handed to renderers after every step;
//! `Orientation` only changes how a renderer maps bar length to geometry.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Bar orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Bars grow upward from the bottom edge
    #[default]
    Vertical,
    /// Bars grow rightward from the left edge
    Horizontal,
}

impl Orientation {
    /// The other orientation (toggle button semantics)
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            _ => Err(Error::InvalidInput(format!("unknown orientation: {}", s))),
        }
    }
}

/// Point-in-time copy of the array state
///
/// Taken under the array lock immediately after a primitive operation, so a
/// snapshot never straddles two logical steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<T = u32> {
    /// Generation of the array this snapshot was taken from
    pub generation: u64,
    /// Bar values
    pub values: Vec<T>,
    /// Per-index "sorted" flags (same length as `values`)
    pub sorted: Vec<bool>,
    /// First highlighted index
    pub highlight_a: Option<usize>,
    /// Second highlighted index
    pub highlight_b: Option<usize>,
}

impl<T> Snapshot<T> {
    /// Number of bars
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for an empty array
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if `index` is one of the two highlighted indices
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlight_a == Some(index) || self.highlight_b == Some(index)
    }

    /// True if neither highlight is set
    pub fn has_no_highlight(&self) -> bool {
        self.highlight_a.is_none() && self.highlight_b.is_none()
    }

    /// True if every index is flagged sorted
    pub fn all_sorted(&self) -> bool {
        self.sorted.iter().all(|&s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_toggle() {
        assert_eq!(Orientation::Vertical.toggled(), Orientation::Horizontal);
        assert_eq!(Orientation::Horizontal.toggled(), Orientation::Vertical);
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("H".parse::<Orientation>().unwrap(), Orientation::Horizontal);
        assert_eq!("vertical".parse::<Orientation>().unwrap(), Orientation::Vertical);
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_snapshot_highlight_queries() {
        let snapshot = Snapshot {
            generation: 1,
            values: vec![3u32, 1, 2],
            sorted: vec![false, false, true],
            highlight_a: Some(0),
            highlight_b: None,
        };

        assert!(snapshot.is_highlighted(0));
        assert!(!snapshot.is_highlighted(1));
        assert!(!snapshot.has_no_highlight());
        assert!(!snapshot.all_sorted());
        assert_eq!(snapshot.len(), 3);
    }
}
