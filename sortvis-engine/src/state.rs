//! Shared array state
//!
//! The bar buffer, its per-index "sorted" flags and the two highlight indices,
//! guarded by a single mutex. Callers never touch the sequences directly: every
//! access goes through [`ArrayState`] or an [`ArrayGuard`] obtained from
//! [`ArrayState::lock`], so a snapshot can never straddle two logical steps.
//!
//! A second, independent slot records which run (if any) owns the array.

use sortvis_common::{Error, Result, Snapshot};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Values that can be sorted and displayed as bars
pub trait BarValue: Copy + Ord + Send + Sync + Debug + 'static {}

impl<T> BarValue for T where T: Copy + Ord + Send + Sync + Debug + 'static {}

#[derive(Debug)]
struct Bars<T> {
    values: Vec<T>,
    sorted: Vec<bool>,
    highlight_a: Option<usize>,
    highlight_b: Option<usize>,
    generation: u64,
}

/// Mutable bar buffer shared between the driver and one sort run
#[derive(Debug)]
pub struct ArrayState<T = u32> {
    bars: Mutex<Bars<T>>,
    owner: Mutex<Option<Uuid>>,
}

impl<T: BarValue> Default for ArrayState<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Poisoning only happens if a holder panicked mid-operation. Every operation
// leaves `Bars` consistent before it can panic (index checks come first), so
// the inner value is still valid and we keep going.
fn lock_ignoring_poison<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: BarValue> ArrayState<T> {
    /// Create an empty array (generation 0)
    pub fn new() -> Self {
        Self {
            bars: Mutex::new(Bars {
                values: Vec::new(),
                sorted: Vec::new(),
                highlight_a: None,
                highlight_b: None,
                generation: 0,
            }),
            owner: Mutex::new(None),
        }
    }

    /// Create an array holding exactly `values` (generation 1)
    pub fn from_values(values: Vec<T>) -> Self {
        let state = Self::new();
        state.load(values);
        state
    }

    /// Acquire the array lock for a multi-operation atomic step
    ///
    /// Do not call other `ArrayState` methods while the guard is alive; they
    /// take the same lock.
    pub fn lock(&self) -> ArrayGuard<'_, T> {
        ArrayGuard {
            bars: lock_ignoring_poison(&self.bars),
        }
    }

    /// Replace the array with `n` generated values and start a new generation
    ///
    /// Clears every sorted flag and both highlights. Returns the new
    /// generation number. Render notification is the caller's job (the
    /// driver forwards it to its sink).
    pub fn reset<G>(&self, n: usize, generator: G) -> u64
    where
        G: FnMut(usize) -> T,
    {
        self.install((0..n).map(generator).collect())
    }

    /// Replace the array with exactly `values` (new generation)
    pub fn load(&self, values: Vec<T>) -> u64 {
        self.install(values)
    }

    fn install(&self, values: Vec<T>) -> u64 {
        let mut bars = lock_ignoring_poison(&self.bars);
        bars.sorted = vec![false; values.len()];
        bars.values = values;
        bars.highlight_a = None;
        bars.highlight_b = None;
        bars.generation += 1;
        bars.generation
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True for an empty array
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    /// Bounds-checked read
    pub fn get(&self, index: usize) -> Result<T> {
        self.lock().get(index)
    }

    /// Bounds-checked write
    pub fn set(&self, index: usize, value: T) -> Result<()> {
        self.lock().set(index, value)
    }

    /// Atomic two-element exchange
    pub fn swap(&self, i: usize, j: usize) -> Result<()> {
        self.lock().swap(i, j)
    }

    /// Pure comparison of two elements; does not touch highlights
    pub fn compare(&self, i: usize, j: usize) -> Result<Ordering> {
        self.lock().compare(i, j)
    }

    /// Flag one index as sorted
    pub fn mark_sorted(&self, index: usize) -> Result<()> {
        self.lock().mark_sorted(index)
    }

    /// Flag every index as sorted
    pub fn mark_all_sorted(&self) {
        self.lock().mark_all_sorted();
    }

    /// Whether `index` is flagged sorted
    pub fn is_sorted_at(&self, index: usize) -> Result<bool> {
        let bars = self.lock();
        bars.check(index)?;
        Ok(bars.bars.sorted[index])
    }

    /// Set both highlight slots
    pub fn set_highlight(&self, a: Option<usize>, b: Option<usize>) -> Result<()> {
        self.lock().set_highlight(a, b)
    }

    /// Clear both highlight slots
    pub fn clear_highlight(&self) {
        self.lock().clear_highlight();
    }

    /// Immutable copy of values, flags and highlights
    pub fn snapshot(&self) -> Snapshot<T> {
        self.lock().snapshot()
    }

    /// Copy of the values only
    pub fn values(&self) -> Vec<T> {
        self.lock().bars.values.clone()
    }

    /// Run currently owning the array, if any
    pub fn active_run(&self) -> Option<Uuid> {
        *lock_ignoring_poison(&self.owner)
    }

    /// Take run ownership of the array
    ///
    /// Fails with `Error::RunActive` while another claim is alive. The claim
    /// is released when the returned value is dropped (including on unwind).
    pub fn try_claim(self: &Arc<Self>, run_id: Uuid) -> Result<RunGuard<T>> {
        let mut owner = lock_ignoring_poison(&self.owner);
        if let Some(existing) = *owner {
            return Err(Error::RunActive(existing));
        }
        *owner = Some(run_id);
        Ok(RunGuard {
            state: Arc::clone(self),
            run_id,
        })
    }
}

/// Exclusive access to the bars for one atomic step
pub struct ArrayGuard<'a, T> {
    bars: MutexGuard<'a, Bars<T>>,
}

impl<'a, T: BarValue> ArrayGuard<'a, T> {
    fn check(&self, index: usize) -> Result<()> {
        let len = self.bars.values.len();
        if index < len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, len })
        }
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.bars.values.len()
    }

    /// True for an empty array
    pub fn is_empty(&self) -> bool {
        self.bars.values.is_empty()
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        self.bars.generation
    }

    /// Bounds-checked read
    pub fn get(&self, index: usize) -> Result<T> {
        self.check(index)?;
        Ok(self.bars.values[index])
    }

    /// Bounds-checked write
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.check(index)?;
        self.bars.values[index] = value;
        Ok(())
    }

    /// Two-element exchange
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check(i)?;
        self.check(j)?;
        self.bars.values.swap(i, j);
        Ok(())
    }

    /// Pure comparison of two elements
    pub fn compare(&self, i: usize, j: usize) -> Result<Ordering> {
        self.check(i)?;
        self.check(j)?;
        Ok(self.bars.values[i].cmp(&self.bars.values[j]))
    }

    /// Copy of the values in `range`
    pub fn copy_range(&self, range: Range<usize>) -> Result<Vec<T>> {
        let len = self.len();
        match self.bars.values.get(range.clone()) {
            Some(slice) => Ok(slice.to_vec()),
            None => Err(Error::IndexOutOfRange {
                index: range.end.max(range.start),
                len,
            }),
        }
    }

    /// Flag one index as sorted
    pub fn mark_sorted(&mut self, index: usize) -> Result<()> {
        self.check(index)?;
        self.bars.sorted[index] = true;
        Ok(())
    }

    /// Flag every index in `range` as sorted
    pub fn mark_sorted_range(&mut self, range: Range<usize>) -> Result<()> {
        if range.end > self.len() {
            return Err(Error::IndexOutOfRange {
                index: range.end - 1,
                len: self.len(),
            });
        }
        for flag in &mut self.bars.sorted[range] {
            *flag = true;
        }
        Ok(())
    }

    /// Flag every index as sorted
    pub fn mark_all_sorted(&mut self) {
        self.bars.sorted.fill(true);
    }

    /// Set both highlight slots (each must be in range when present)
    pub fn set_highlight(&mut self, a: Option<usize>, b: Option<usize>) -> Result<()> {
        if let Some(index) = a {
            self.check(index)?;
        }
        if let Some(index) = b {
            self.check(index)?;
        }
        self.bars.highlight_a = a;
        self.bars.highlight_b = b;
        Ok(())
    }

    /// Clear both highlight slots
    pub fn clear_highlight(&mut self) {
        self.bars.highlight_a = None;
        self.bars.highlight_b = None;
    }

    /// Immutable copy of values, flags and highlights
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            generation: self.bars.generation,
            values: self.bars.values.clone(),
            sorted: self.bars.sorted.clone(),
            highlight_a: self.bars.highlight_a,
            highlight_b: self.bars.highlight_b,
        }
    }

    // Unchecked accessors for the sort algorithms. Their index arithmetic
    // stays inside [0, len); a slip panics on the slice index, which is the
    // fail-fast treatment an out-of-range access deserves.

    pub(crate) fn value(&self, index: usize) -> T {
        self.bars.values[index]
    }

    pub(crate) fn write(&mut self, index: usize, value: T) {
        self.bars.values[index] = value;
    }

    pub(crate) fn exchange(&mut self, i: usize, j: usize) {
        self.bars.values.swap(i, j);
    }

    pub(crate) fn highlight(&mut self, a: Option<usize>, b: Option<usize>) {
        debug_assert!(a.map_or(true, |i| i < self.len()), "highlight a out of range");
        debug_assert!(b.map_or(true, |i| i < self.len()), "highlight b out of range");
        self.bars.highlight_a = a;
        self.bars.highlight_b = b;
    }

    pub(crate) fn mark(&mut self, index: usize) {
        self.bars.sorted[index] = true;
    }
}

/// Run ownership of one [`ArrayState`]
///
/// At most one claim exists per array. Dropping the claim releases it.
#[derive(Debug)]
pub struct RunGuard<T: BarValue = u32> {
    state: Arc<ArrayState<T>>,
    run_id: Uuid,
}

impl<T: BarValue> RunGuard<T> {
    /// Run that holds the claim
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// True if this claim was taken on `state`
    pub fn belongs_to(&self, state: &Arc<ArrayState<T>>) -> bool {
        Arc::ptr_eq(&self.state, state)
    }
}

impl<T: BarValue> Drop for RunGuard<T> {
    fn drop(&mut self) {
        let mut owner = lock_ignoring_poison(&self.state.owner);
        if *owner == Some(self.run_id) {
            *owner = None;
        }
    }
}
