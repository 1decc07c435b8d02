use std::io::Cursor;

use twap_book::feed::replay;
use twap_book::simulate::{self, RandomConfig};

#[test]
fn ramp_writes_ascending_inserts_then_reverse_cancels() {
    let mut buf = Vec::new();
    let written = simulate::write_ramp(&mut buf, 2).unwrap();
    assert_eq!(written, 6);

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["0 I 0 1", "1 I 1 2", "2 I 2 3", "3 E 2", "4 E 1", "5 E 0"]
    );
}

#[test]
fn ramp_average_matches_the_closed_form() {
    // Prices 1..=ops+1 held for one unit each on the way up, then the top
    // peels off one per unit on the way down. The average telescopes to
    // (ops + 1)^2 / (2 * ops + 1).
    for ops in [1u64, 2, 10, 100] {
        let mut buf = Vec::new();
        simulate::write_ramp(&mut buf, ops).unwrap();

        let summary = replay(Cursor::new(&buf)).unwrap();
        let expected = ((ops + 1) * (ops + 1)) as f64 / (2 * ops + 1) as f64;
        assert!(
            (summary.time_weighted_average_price - expected).abs() < 1e-9,
            "ops={}: expected {}, got {}",
            ops,
            expected,
            summary.time_weighted_average_price
        );
        assert_eq!(summary.events as u64, 2 * (ops + 1));
        assert_eq!(summary.open_orders, 0);
        assert_eq!(summary.time_exposed as u64, 2 * ops + 1);
    }
}

#[test]
fn random_logs_are_deterministic_per_seed() {
    let cfg = RandomConfig {
        ops: 500,
        seed: 7,
        ..RandomConfig::default()
    };
    let mut first = Vec::new();
    let mut second = Vec::new();
    simulate::write_random(&mut first, &cfg).unwrap();
    simulate::write_random(&mut second, &cfg).unwrap();
    assert_eq!(first, second);

    let mut other_seed = Vec::new();
    simulate::write_random(&mut other_seed, &RandomConfig { seed: 8, ..cfg }).unwrap();
    assert_ne!(first, other_seed);
}

#[test]
fn random_logs_replay_cleanly_and_drain_the_book() {
    let cfg = RandomConfig {
        ops: 2_000,
        seed: 3,
        ..RandomConfig::default()
    };
    let mut buf = Vec::new();
    let written = simulate::write_random(&mut buf, &cfg).unwrap();

    let summary = replay(Cursor::new(&buf)).unwrap();
    assert_eq!(summary.events as u64, written);
    assert_eq!(summary.open_orders, 0);
    assert!(summary.time_exposed > 0);
    assert!(summary.time_weighted_average_price.is_finite());
    assert!(summary.time_weighted_average_price > 0.0);
}
