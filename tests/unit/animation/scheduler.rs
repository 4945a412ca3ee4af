use super::*;

fn single(duration_s: f64) -> AnimationSettings {
    AnimationSettings::new(duration_s).unwrap()
}

fn multi(duration_s: f64, interval_ms: f64) -> AnimationSettings {
    AnimationSettings::new(duration_s)
        .unwrap()
        .with_multi_dot(interval_ms)
        .unwrap()
}

#[test]
fn start_requires_two_nodes() {
    let mut s = Scheduler::new();
    let err = s.start(1, &single(2.0)).unwrap_err();
    assert!(matches!(err, FlowloopError::Precondition(_)));
    assert_eq!(s.state(), SchedulerState::Idle);
    assert!(s.dots().is_empty());
}

#[test]
fn start_seeds_dots_per_mode() {
    let mut s = Scheduler::new();
    s.start(2, &single(2.0)).unwrap();
    assert_eq!(s.dots(), &[Dot::START]);

    let mut s = Scheduler::new();
    s.start(2, &multi(2.0, 100.0)).unwrap();
    assert!(s.dots().is_empty());
}

#[test]
fn single_dot_advances_and_wraps() {
    let settings = single(2.0);
    let mut s = Scheduler::new();
    s.start(2, &settings).unwrap();
    for _ in 0..4 {
        assert_eq!(s.tick(250.0, &settings), TickOutcome::Redraw);
    }
    assert!((s.dots()[0].progress - 0.5).abs() < 1e-12);

    s.tick(1000.0, &settings);
    assert!(s.dots()[0].progress.abs() < 1e-12);
    s.tick(500.0, &settings);
    assert!((s.dots()[0].progress - 0.25).abs() < 1e-12);
}

#[test]
fn first_timestamp_tick_has_zero_delta() {
    let settings = single(1.0);
    let mut s = Scheduler::new();
    s.start(2, &settings).unwrap();
    s.tick_at(123_456.0, &settings);
    assert_eq!(s.dots()[0].progress, 0.0);
    s.tick_at(123_456.0 + 100.0, &settings);
    assert!((s.dots()[0].progress - 0.1).abs() < 1e-12);
}

#[test]
fn multi_dot_spawns_at_most_one_per_tick() {
    let settings = multi(1.0, 100.0);
    let mut s = Scheduler::new();
    s.start(2, &settings).unwrap();

    // Exactly the interval is not enough: spawning needs the accumulator to exceed it.
    s.tick(100.0, &settings);
    assert!(s.dots().is_empty());

    s.tick(450.0, &settings);
    assert_eq!(s.dots().len(), 1);
    // The new dot is advanced in the same tick it spawned.
    assert!((s.dots()[0].progress - 0.45).abs() < 1e-12);
}

#[test]
fn multi_dot_retires_dots_past_the_end() {
    let settings = multi(1.0, 50.0);
    let mut s = Scheduler::new();
    s.start(2, &settings).unwrap();
    s.tick(60.0, &settings);
    assert_eq!(s.dots().len(), 1);

    s.tick(900.0, &settings);
    assert_eq!(s.dots().len(), 2);
    assert!((s.dots()[0].progress - 0.96).abs() < 1e-12);

    s.tick(30.0, &settings);
    assert_eq!(s.dots().len(), 2);
    assert!((s.dots()[0].progress - 0.99).abs() < 1e-12);

    // 0.99 + 0.02 strictly exceeds 1 and is dropped; the accumulator (50) does not exceed the
    // interval, so nothing spawns.
    s.tick(20.0, &settings);
    assert_eq!(s.dots().len(), 1);
    assert!((s.dots()[0].progress - 0.95).abs() < 1e-12);
}

#[test]
fn stop_is_idempotent_and_freezes_ticks() {
    let settings = single(2.0);
    let mut s = Scheduler::new();
    s.start(2, &settings).unwrap();
    s.tick(100.0, &settings);

    assert!(s.stop());
    assert!(!s.stop());
    let frozen = s.dots().to_vec();
    assert_eq!(s.tick(500.0, &settings), TickOutcome::Idle);
    assert_eq!(s.tick_at(10.0, &settings), TickOutcome::Idle);
    assert_eq!(s.dots(), frozen.as_slice());
}

#[test]
fn negative_deltas_do_not_rewind() {
    let settings = single(1.0);
    let mut s = Scheduler::new();
    s.start(2, &settings).unwrap();
    s.tick(200.0, &settings);
    s.tick(-500.0, &settings);
    assert!((s.dots()[0].progress - 0.2).abs() < 1e-12);
}
