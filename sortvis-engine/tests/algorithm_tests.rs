//! Algorithm correctness tests
//!
//! Tests the behavior every algorithm must share:
//! - Completed runs leave a non-decreasing array with every bar flagged sorted
//! - The multiset of values is preserved
//! - Already-sorted input is left identical (and bubble/selection write nothing)
//! - Merge sort keeps equal keys in their original order
//! - The N=5 bubble scenario and the N<=1 no-step edge cases

mod helpers;

use helpers::*;
use sortvis_common::{Algorithm, RunOutcome};
use sortvis_engine::{CancelToken, NullSink, RenderSink};
use std::sync::Arc;

fn is_non_decreasing<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

#[test]
fn test_random_inputs_sort_completely() {
    for algorithm in Algorithm::ALL {
        for (seed, n) in [(1, 0), (2, 1), (3, 2), (4, 3), (5, 17), (6, 60), (7, 128)] {
            let values = seeded_values(seed, n, 580);
            let sink = Arc::new(RecordingSink::<u32>::new());
            let engine = engine_for(values.clone(), sink.clone());

            let report = engine.run(algorithm, &CancelToken::new()).unwrap();

            let snapshot = engine.state().snapshot();
            assert_eq!(report.outcome, RunOutcome::Completed);
            assert!(
                is_non_decreasing(&snapshot.values),
                "{} n={} not sorted: {:?}",
                algorithm,
                n,
                snapshot.values
            );
            assert!(snapshot.all_sorted(), "{} n={} sorted mask", algorithm, n);
            assert!(snapshot.has_no_highlight());
            assert_eq!(multiset(&snapshot.values), multiset(&values), "{} n={}", algorithm, n);
            assert_eq!(report.steps as usize, sink.step_count());
        }
    }
}

#[test]
fn test_duplicate_heavy_input() {
    for algorithm in Algorithm::ALL {
        let values = seeded_values(99, 80, 4);
        let engine = engine_for(values.clone(), Arc::new(NullSink));
        engine.run(algorithm, &CancelToken::new()).unwrap();
        assert_eq!(engine.state().values(), multiset(&values), "{}", algorithm);
    }
}

#[test]
fn test_every_step_preserves_lengths_and_generation() {
    for algorithm in Algorithm::ALL {
        let values = seeded_values(11, 24, 100);
        let sink = Arc::new(RecordingSink::<u32>::new());
        let engine = engine_for(values, sink.clone());
        let generation = engine.state().generation();

        engine.run(algorithm, &CancelToken::new()).unwrap();

        for step in sink.steps() {
            assert_eq!(step.values.len(), 24);
            assert_eq!(step.sorted.len(), 24);
            assert_eq!(step.generation, generation);
        }
    }
}

#[test]
fn test_sorted_input_is_left_identical() {
    let sorted: Vec<u32> = (1..=40).map(|v| v * 3).collect();
    for algorithm in Algorithm::ALL {
        let engine = engine_for(sorted.clone(), Arc::new(NullSink));
        let report = engine.run(algorithm, &CancelToken::new()).unwrap();

        assert!(report.is_completed());
        assert_eq!(engine.state().values(), sorted, "{}", algorithm);
        if matches!(algorithm, Algorithm::Bubble | Algorithm::Selection) {
            assert_eq!(report.writes, 0, "{} swapped sorted input", algorithm);
        }
    }
}

#[test]
fn test_rerun_on_sorted_result_is_stable() {
    for algorithm in Algorithm::ALL {
        let engine = engine_for(seeded_values(5, 30, 50), Arc::new(NullSink));
        engine.run(algorithm, &CancelToken::new()).unwrap();
        let first = engine.state().values();

        engine.run(algorithm, &CancelToken::new()).unwrap();
        assert_eq!(engine.state().values(), first, "{}", algorithm);
    }
}

#[test]
fn test_merge_sort_is_stable() {
    let keys = [3u8, 1, 3, 2, 1, 3, 2, 1, 0, 2, 3, 0];
    let values: Vec<Tagged> = keys
        .iter()
        .enumerate()
        .map(|(id, &key)| Tagged { key, id: id as u32 })
        .collect();

    let sink: Arc<dyn RenderSink<Tagged>> = Arc::new(NullSink);
    let engine = engine_for(values, sink);
    engine.run(Algorithm::Merge, &CancelToken::new()).unwrap();

    let result = engine.state().values();
    for pair in result.windows(2) {
        assert!(pair[0].key <= pair[1].key);
        if pair[0].key == pair[1].key {
            assert!(
                pair[0].id < pair[1].id,
                "equal keys reordered: {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_bubble_scenario_five_bars() {
    let sink = Arc::new(RecordingSink::<u32>::new());
    let engine = engine_for(vec![5, 3, 4, 1, 2], sink.clone());

    engine.run(Algorithm::Bubble, &CancelToken::new()).unwrap();

    let steps = sink.steps();
    assert_eq!(steps[0].values, vec![3, 5, 4, 1, 2]);
    assert_eq!((steps[0].highlight_a, steps[0].highlight_b), (Some(0), Some(1)));

    let (closing, report) = sink.last_finish().unwrap();
    assert_eq!(closing.values, vec![1, 2, 3, 4, 5]);
    assert!(closing.all_sorted());
    assert!(closing.has_no_highlight());
    assert!(report.is_completed());
}

#[test]
fn test_bubble_marks_tail_after_each_pass() {
    let sink = Arc::new(RecordingSink::<u32>::new());
    let engine = engine_for(vec![5, 3, 4, 1, 2], sink.clone());
    engine.run(Algorithm::Bubble, &CancelToken::new()).unwrap();

    // Pass 0 compares four pairs; the first step of pass 1 shows index 4 final
    let steps = sink.steps();
    assert_eq!(steps[4].sorted, vec![false, false, false, false, true]);
    assert_eq!(steps[4].values[4], 5);
}

#[test]
fn test_single_bar_runs_emit_no_steps() {
    for algorithm in Algorithm::ALL {
        let sink = Arc::new(RecordingSink::<u32>::new());
        let engine = engine_for(vec![7], sink.clone());

        let report = engine.run(algorithm, &CancelToken::new()).unwrap();

        assert_eq!(sink.step_count(), 0, "{}", algorithm);
        assert_eq!(report.steps, 0);
        assert!(engine.state().snapshot().all_sorted());
        assert_eq!(sink.finished().len(), 1);
    }
}

#[test]
fn test_empty_array_runs_emit_no_steps() {
    for algorithm in Algorithm::ALL {
        let sink = Arc::new(RecordingSink::<u32>::new());
        let engine = engine_for(Vec::new(), sink.clone());
        let report = engine.run(algorithm, &CancelToken::new()).unwrap();
        assert!(report.is_completed());
        assert_eq!(sink.step_count(), 0);
    }
}

#[test]
fn test_merge_and_quick_mark_only_at_the_end() {
    for algorithm in [Algorithm::Merge, Algorithm::Quick] {
        let sink = Arc::new(RecordingSink::<u32>::new());
        let engine = engine_for(seeded_values(8, 16, 40), sink.clone());
        engine.run(algorithm, &CancelToken::new()).unwrap();

        assert!(
            sink.steps().iter().all(|s| s.sorted.iter().all(|&f| !f)),
            "{} marked bars before finishing",
            algorithm
        );
        assert!(sink.last_finish().unwrap().0.all_sorted());
    }
}

#[test]
fn test_selection_marks_one_bar_per_scan() {
    let sink = Arc::new(RecordingSink::<u32>::new());
    let engine = engine_for(vec![4, 1, 3, 2], sink.clone());
    engine.run(Algorithm::Selection, &CancelToken::new()).unwrap();

    // Three probes for i=0, then the swap frame
    let steps = sink.steps();
    assert_eq!(steps[3].values, vec![1, 4, 3, 2]);
    assert_eq!(steps[3].sorted, vec![true, false, false, false]);
}

#[test]
fn test_quick_worst_case_input_completes() {
    let descending: Vec<u32> = (1..=200).rev().collect();
    let engine = engine_for(descending, Arc::new(NullSink));
    let report = engine.run(Algorithm::Quick, &CancelToken::new()).unwrap();

    assert!(report.is_completed());
    assert_eq!(engine.state().values(), (1..=200).collect::<Vec<u32>>());
}
