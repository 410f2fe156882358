//! Text rendering of snapshots
//!
//! Draws bars into a character grid. Sorted bars, highlighted bars and plain
//! bars use distinct glyphs; a highlight wins over the sorted flag, matching
//! the colour precedence of a graphical renderer.

use sortvis_common::{Orientation, Snapshot};
use std::fmt::Write;

/// Glyph for a bar flagged sorted
pub const SORTED_GLYPH: char = '#';
/// Glyph for a highlighted bar
pub const HIGHLIGHT_GLYPH: char = '@';
/// Glyph for any other bar
pub const PLAIN_GLYPH: char = '|';

/// Character-grid renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    /// Grid cells available along the bar length
    pub extent: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { extent: 20 }
    }
}

impl TextRenderer {
    pub fn new(extent: usize) -> Self {
        Self {
            extent: extent.max(1),
        }
    }

    /// Cells a bar of `value` occupies when `max_value` fills the extent
    ///
    /// Non-zero values always get at least one cell.
    pub fn scaled(&self, value: u32, max_value: u32) -> usize {
        if max_value == 0 || value == 0 {
            return 0;
        }
        let cells = (value as u64 * self.extent as u64).div_ceil(max_value as u64) as usize;
        cells.clamp(1, self.extent)
    }

    /// Draw a snapshot. Vertical bars grow upward, one column per bar;
    /// horizontal bars grow rightward, one line per bar.
    pub fn render(&self, snapshot: &Snapshot<u32>, orientation: Orientation, max_value: u32) -> String {
        let cells: Vec<(usize, char)> = (0..snapshot.len())
            .map(|i| (self.scaled(snapshot.values[i], max_value), glyph(snapshot, i)))
            .collect();

        let mut out = String::new();
        match orientation {
            Orientation::Vertical => {
                for row in (0..self.extent).rev() {
                    let line: String = cells
                        .iter()
                        .map(|&(len, g)| if len > row { g } else { ' ' })
                        .collect();
                    out.push_str(line.trim_end());
                    out.push('\n');
                }
            }
            Orientation::Horizontal => {
                for &(len, g) in &cells {
                    out.extend(std::iter::repeat(g).take(len));
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn glyph(snapshot: &Snapshot<u32>, index: usize) -> char {
    if snapshot.is_highlighted(index) {
        HIGHLIGHT_GLYPH
    } else if snapshot.sorted.get(index).copied().unwrap_or(false) {
        SORTED_GLYPH
    } else {
        PLAIN_GLYPH
    }
}

/// One `arr[i] = v` line per bar
pub fn labels<T: std::fmt::Display>(snapshot: &Snapshot<T>) -> Vec<String> {
    snapshot
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("arr[{}] = {}", i, v))
        .collect()
}

/// Short status summary for the command loop
pub fn status_line(snapshot: &Snapshot<u32>, delay_ms: f64, paused: bool, running: bool) -> String {
    let sorted = snapshot.sorted.iter().filter(|&&s| s).count();
    let mut line = String::new();
    let _ = write!(
        line,
        "generation {} | {} bars | {}/{} sorted | delay {} ms",
        snapshot.generation,
        snapshot.len(),
        sorted,
        snapshot.len(),
        delay_ms
    );
    if paused {
        line.push_str(" | paused");
    }
    if running {
        line.push_str(" | running");
    }
    line
}
