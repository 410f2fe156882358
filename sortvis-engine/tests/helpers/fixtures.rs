//! Array fixtures

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sortvis_engine::{ArrayState, BarValue, PaceController, RenderSink, SortEngine};
use std::cmp::Ordering;
use std::sync::Arc;

/// Reproducible random values in `[1, max]`
pub fn seeded_values(seed: u64, n: usize, max: u32) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(1..=max)).collect()
}

/// Sorted copy, for multiset comparison
pub fn multiset<T: Ord + Clone>(values: &[T]) -> Vec<T> {
    let mut sorted = values.to_vec();
    sorted.sort();
    sorted
}

/// Unthrottled engine over `values`
pub fn engine_for<T: BarValue>(values: Vec<T>, sink: Arc<dyn RenderSink<T>>) -> SortEngine<T> {
    SortEngine::new(
        Arc::new(ArrayState::from_values(values)),
        Arc::new(PaceController::unthrottled()),
        sink,
    )
}

/// Value ordered by `key` only; `id` tells equal keys apart
#[derive(Debug, Clone, Copy)]
pub struct Tagged {
    pub key: u8,
    pub id: u32,
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
