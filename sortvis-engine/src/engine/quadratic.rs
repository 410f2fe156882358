//! Bubble, insertion and selection sort

use super::core::Stepper;
use crate::pace::StepResult;
use crate::state::BarValue;

/// Adjacent compare-and-swap passes, stopping early on a swap-free pass.
/// After pass `p` the bar at `n - 1 - p` is final.
pub(crate) fn bubble<T: BarValue>(cx: &mut Stepper<'_, T>) -> StepResult {
    let n = cx.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            {
                let mut bars = cx.bars();
                bars.highlight(Some(j), Some(j + 1));
                cx.comparisons += 1;
                if bars.value(j) > bars.value(j + 1) {
                    bars.exchange(j, j + 1);
                    cx.writes += 1;
                    swapped = true;
                }
            }
            cx.step()?;
        }
        cx.bars().mark(n - 1 - pass);
        if !swapped {
            break;
        }
    }
    Ok(())
}

/// Shift larger bars right until the held key fits.
///
/// While a shift is in flight the key lives only in this frame and the array
/// holds a duplicate at the open slot. On cancellation the key is written back
/// into that slot before unwinding, so the array stays a permutation. A cancel
/// raised at a prefix frame is seen before the next key is lifted.
pub(crate) fn insertion<T: BarValue>(cx: &mut Stepper<'_, T>) -> StepResult {
    let n = cx.len();
    for i in 1..n {
        cx.check_cancelled()?;
        let key = cx.bars().value(i);
        let mut hole = i;
        loop {
            let shifted = {
                let mut bars = cx.bars();
                let left = hole.checked_sub(1);
                bars.highlight(left, Some(hole));
                match left {
                    Some(j) => {
                        cx.comparisons += 1;
                        let candidate = bars.value(j);
                        if candidate > key {
                            bars.write(hole, candidate);
                            cx.writes += 1;
                            true
                        } else {
                            false
                        }
                    }
                    None => false,
                }
            };
            if !shifted {
                cx.bars().write(hole, key);
                cx.writes += 1;
                break;
            }
            hole -= 1;
            if let Err(cancelled) = cx.step() {
                cx.bars().write(hole, key);
                cx.writes += 1;
                return Err(cancelled);
            }
        }
        {
            let mut bars = cx.bars();
            for k in 0..=i {
                bars.mark(k);
            }
        }
        cx.publish()?;
    }
    Ok(())
}

/// Scan for the minimum of the unsorted suffix and swap it into place.
/// Already-placed minima are never swapped, so sorted input sees no writes.
pub(crate) fn selection<T: BarValue>(cx: &mut Stepper<'_, T>) -> StepResult {
    let n = cx.len();
    for i in 0..n.saturating_sub(1) {
        cx.check_cancelled()?;
        let mut min = i;
        for j in i + 1..n {
            {
                let mut bars = cx.bars();
                bars.highlight(Some(min), Some(j));
                cx.comparisons += 1;
                if bars.value(j) < bars.value(min) {
                    min = j;
                }
            }
            cx.step()?;
        }
        {
            let mut bars = cx.bars();
            if min != i {
                bars.exchange(i, min);
                cx.writes += 1;
            }
            bars.mark(i);
        }
        cx.publish()?;
    }
    Ok(())
}
