use instant::{Duration, Instant};
use nebula_one::clock::Clock;

#[test]
fn should_measure_elapsed_time() {
    let start = Instant::now();
    let clock = Clock::started_at(start);

    assert_eq!(clock.elapsed_at(start), Duration::ZERO);
    assert_eq!(
        clock.elapsed_at(start + Duration::from_millis(1_500)),
        Duration::from_millis(1_500)
    );
}

#[test]
fn should_never_run_backwards() {
    let start = Instant::now() + Duration::from_secs(60);
    let clock = Clock::started_at(start);

    assert_eq!(clock.elapsed_at(start - Duration::from_secs(1)), Duration::ZERO);
    assert_eq!(clock.elapsed(), Duration::ZERO);
    assert_eq!(clock.elapsed_secs(), 0.0);
}

#[test]
fn should_advance_from_mount() {
    let clock = Clock::start();
    let first = clock.elapsed();
    let second = clock.elapsed();

    assert!(second >= first);
    assert!(clock.elapsed_secs() >= 0.0);
}
