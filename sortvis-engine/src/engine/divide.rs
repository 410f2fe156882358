//! Merge sort and quick sort

use super::core::Stepper;
use crate::pace::{Cancelled, StepResult};
use crate::state::BarValue;

/// Top-down merge sort over inclusive bounds
pub(crate) fn merge<T: BarValue>(cx: &mut Stepper<'_, T>) -> StepResult {
    let n = cx.len();
    if n > 1 {
        merge_range(cx, 0, n - 1)?;
    }
    Ok(())
}

fn merge_range<T: BarValue>(cx: &mut Stepper<'_, T>, l: usize, r: usize) -> StepResult {
    if l >= r {
        return Ok(());
    }
    let m = l + (r - l) / 2;
    merge_range(cx, l, m)?;
    merge_range(cx, m + 1, r)?;
    merge_halves(cx, l, m, r)
}

struct MergeCursor<T> {
    left: Vec<T>,
    right: Vec<T>,
    i: usize,
    j: usize,
    k: usize,
}

impl<T: BarValue> MergeCursor<T> {
    /// Next value in merged order. Ties take the left element, which keeps
    /// the sort stable.
    fn take(&mut self) -> Option<T> {
        match (self.left.get(self.i), self.right.get(self.j)) {
            (Some(&a), Some(&b)) if b < a => {
                self.j += 1;
                Some(b)
            }
            (Some(&a), _) => {
                self.i += 1;
                Some(a)
            }
            (None, Some(&b)) => {
                self.j += 1;
                Some(b)
            }
            (None, None) => None,
        }
    }

    fn both_pending(&self) -> bool {
        self.i < self.left.len() && self.j < self.right.len()
    }
}

fn merge_halves<T: BarValue>(cx: &mut Stepper<'_, T>, l: usize, m: usize, r: usize) -> StepResult {
    let (left, right): (Vec<T>, Vec<T>) = {
        let bars = cx.bars();
        (
            (l..=m).map(|x| bars.value(x)).collect(),
            (m + 1..=r).map(|x| bars.value(x)).collect(),
        )
    };
    let mut cursor = MergeCursor {
        left,
        right,
        i: 0,
        j: 0,
        k: l,
    };

    loop {
        // Main loop shows the output slot against the left-half element being
        // considered; the drain loops show the output slot alone.
        let comparing = cursor.both_pending();
        let probe = comparing.then(|| l + cursor.i);
        let value = match cursor.take() {
            Some(value) => value,
            None => break,
        };
        {
            let mut bars = cx.bars();
            bars.highlight(Some(cursor.k), probe);
            if comparing {
                cx.comparisons += 1;
            }
            bars.write(cursor.k, value);
            cx.writes += 1;
        }
        cursor.k += 1;
        if let Err(cancelled) = cx.step() {
            finish_copy_back(cx, &mut cursor);
            return Err(cancelled);
        }
    }
    Ok(())
}

// Cancellation mid-merge: the buffers hold the only copies of values not yet
// written back. Write them all before unwinding so the array stays a
// permutation of its original contents.
fn finish_copy_back<T: BarValue>(cx: &mut Stepper<'_, T>, cursor: &mut MergeCursor<T>) {
    let mut bars = cx.bars();
    while let Some(value) = cursor.take() {
        bars.write(cursor.k, value);
        cx.writes += 1;
        cursor.k += 1;
    }
}

/// Lomuto quick sort with the last element as pivot
pub(crate) fn quick<T: BarValue>(cx: &mut Stepper<'_, T>) -> StepResult {
    let n = cx.len();
    if n > 1 {
        quick_range(cx, 0, n - 1)?;
    }
    Ok(())
}

fn quick_range<T: BarValue>(cx: &mut Stepper<'_, T>, lo: usize, hi: usize) -> StepResult {
    if lo >= hi {
        return Ok(());
    }
    let p = partition(cx, lo, hi)?;
    if p > lo {
        quick_range(cx, lo, p - 1)?;
    }
    quick_range(cx, p + 1, hi)
}

fn partition<T: BarValue>(cx: &mut Stepper<'_, T>, lo: usize, hi: usize) -> Result<usize, Cancelled> {
    let pivot = cx.bars().value(hi);
    let mut store = lo;
    for j in lo..hi {
        {
            let mut bars = cx.bars();
            bars.highlight(Some(j), Some(hi));
            cx.comparisons += 1;
            if bars.value(j) < pivot {
                if store != j {
                    bars.exchange(store, j);
                    cx.writes += 1;
                }
                store += 1;
            }
        }
        cx.step()?;
    }
    {
        let mut bars = cx.bars();
        bars.highlight(Some(store), Some(hi));
        if store != hi {
            bars.exchange(store, hi);
            cx.writes += 1;
        }
    }
    cx.step()?;
    Ok(store)
}
