//! Property-based tests for wheel geometry and the spin engine
//!
//! Every spin must land inside the wheel, report the segment it visually
//! stopped on, and never turn backwards.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use prize_wheel::prelude::*;

// ===== Strategy definitions =====

/// Wheel sizes from a single segment up to a crowded wheel
fn segment_count_strategy() -> impl Strategy<Value = usize> {
    1usize..=64usize
}

/// Rotations on a 1/8 degree grid so shifting by whole turns is exact
fn grid_rotation_strategy() -> impl Strategy<Value = f64> {
    (0u32..2_880_000u32).prop_map(|q| f64::from(q) / 8.0)
}

/// Any rotation, including negative and very large ones
fn any_rotation_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6f64..1.0e6f64,
        Just(0.0),
        Just(360.0),
        Just(-0.0),
        Just(1.0e12),
    ]
}

fn wheel(n: usize, seed: u64) -> WheelConfig {
    let segments = (0..n)
        .map(|i| Segment::new(format!("Prize {i}"), "#123456"))
        .collect();
    WheelConfig::new(segments).with_seed(seed)
}

// ===== Geometry =====

proptest! {
    /// The winner index is always a valid segment
    #[test]
    fn prop_winner_index_in_range(r in any_rotation_strategy(), n in segment_count_strategy()) {
        prop_assert!(winner_index(r, n) < n);
    }

    /// Whole extra turns never change the winner
    #[test]
    fn prop_winner_index_periodic(
        r in grid_rotation_strategy(),
        turns in 0u32..20u32,
        n in segment_count_strategy(),
    ) {
        let shifted = r + f64::from(turns) * 360.0;
        prop_assert_eq!(winner_index(shifted, n), winner_index(r, n));
    }

    /// An unrotated wheel shows segment 0 under the pointer
    #[test]
    fn prop_zero_rotation_is_first_segment(n in segment_count_strategy()) {
        prop_assert_eq!(winner_index(0.0, n), 0);
    }

    /// Pointer angle stays in a single turn
    #[test]
    fn prop_pointer_angle_in_turn(r in any_rotation_strategy()) {
        let a = pointer_angle(r);
        prop_assert!((0.0..360.0).contains(&a), "pointer angle {} out of range", a);
    }

    /// Wedges tile the circle with no gaps
    #[test]
    fn prop_wedges_tile_circle(n in segment_count_strategy()) {
        let mut end = wedge_bounds(0, n).start_degrees;
        for i in 0..n {
            let b = wedge_bounds(i, n);
            prop_assert!((b.start_degrees - end).abs() < 1e-9);
            prop_assert!((b.sweep() - segment_angle(n)).abs() < 1e-9);
            end = b.end_degrees;
        }
        prop_assert!((end - wedge_bounds(0, n).start_degrees - 360.0).abs() < 1e-9);
    }
}

// ===== Easing =====

proptest! {
    /// Ease-out cubic is non-decreasing on [0, 1]
    #[test]
    fn prop_easing_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ease_out_cubic(lo) <= ease_out_cubic(hi));
    }

    /// Output stays in [0, 1] even for out-of-range input
    #[test]
    fn prop_easing_clamped(t in -10.0f64..10.0) {
        let v = ease_out_cubic(t);
        prop_assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn test_easing_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
}

// ===== Engine =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The reported winner is the segment under the pointer at the final rotation
    #[test]
    fn prop_winner_matches_final_rotation(seed in any::<u64>(), n in segment_count_strategy()) {
        let config = wheel(n, seed);
        let mut engine = SpinEngine::new(&config).unwrap();
        let transcript = SpinSimulator::new().run(&mut engine, 0.0).unwrap();

        let run = transcript.run.unwrap();
        let winner = transcript.winner.unwrap();
        prop_assert_eq!(engine.rotation(), run.target_rotation);
        prop_assert_eq!(winner.index, winner_index(run.target_rotation, n));
        prop_assert_eq!(&winner.label, &config.segments[winner.index].label);
        prop_assert!(!engine.is_spinning());
    }

    /// Travel is always between the configured turn counts
    #[test]
    fn prop_target_distance_in_turn_range(seed in any::<u64>(), start in 0.0f64..1.0e5) {
        let mut engine = SpinEngine::new(&wheel(6, seed)).unwrap();
        let mut scheduler = ManualScheduler::new();
        engine.spin_to(start, 0.0, &mut scheduler).unwrap();
        engine.on_frame(5_000.0, &mut scheduler, &mut NoopObserver).unwrap();

        let SpinRequest::Started(run) = engine.spin(10_000.0, &mut scheduler).unwrap() else {
            return Err(TestCaseError::fail("second spin should start"));
        };
        let distance = run.target_rotation - run.start_rotation;
        prop_assert!(distance >= 4.0 * 360.0);
        prop_assert!(distance < 9.0 * 360.0);
    }

    /// Spinning while spinning changes nothing
    #[test]
    fn prop_reentrant_spin_ignored(seed in any::<u64>(), later in 0.0f64..5_000.0) {
        let mut engine = SpinEngine::new(&wheel(6, seed)).unwrap();
        let mut scheduler = ManualScheduler::new();
        engine.spin(0.0, &mut scheduler).unwrap();
        engine.on_frame(later, &mut scheduler, &mut NoopObserver).unwrap();
        let state = engine.state();
        let run = *engine.active_run().unwrap();
        let requested = scheduler.requested();

        prop_assert_eq!(engine.spin(later, &mut scheduler).unwrap(), SpinRequest::Ignored);
        prop_assert_eq!(engine.state(), state);
        prop_assert_eq!(*engine.active_run().unwrap(), run);
        prop_assert_eq!(scheduler.requested(), requested);
    }

    /// Rotation never decreases, whatever order frames arrive in
    #[test]
    fn prop_rotation_monotonic(
        seed in any::<u64>(),
        times in prop::collection::vec(0.0f64..6_000.0, 1..60),
    ) {
        let mut engine = SpinEngine::new(&wheel(8, seed)).unwrap();
        let mut scheduler = ManualScheduler::new();
        engine.spin(0.0, &mut scheduler).unwrap();

        let mut prev = engine.rotation();
        for t in times {
            engine.on_frame(t, &mut scheduler, &mut NoopObserver).unwrap();
            prop_assert!(engine.rotation() >= prev);
            prev = engine.rotation();
        }
    }

    /// At most one tick per frame and exactly one winner per spin
    #[test]
    fn prop_tick_and_result_counts(seed in any::<u64>(), interval in 1.0f64..500.0) {
        let mut engine = SpinEngine::new(&wheel(12, seed)).unwrap();
        let transcript = SpinSimulator::new()
            .with_frame_interval_ms(interval)
            .run(&mut engine, 0.0)
            .unwrap();

        prop_assert!(transcript.tick_count() <= transcript.frames);
        prop_assert!(transcript.winner.is_some());
        prop_assert_eq!(engine.spins_completed(), 1);
    }
}
