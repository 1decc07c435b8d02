use std::hint::black_box;
use std::io::Cursor;

use criterion::{Criterion, criterion_group, criterion_main};
use twap_book::events::Event;
use twap_book::feed::replay;
use twap_book::orderbook::OrderBook;
use twap_book::simulate::{self, RandomConfig};

fn ramp_events(ops: u64) -> Vec<Event> {
    let mut events = Vec::with_capacity(2 * (ops as usize + 1));
    for i in 0..=ops {
        events.push(Event::insert(i as i64, i, (i + 1) as f64));
    }
    let mut ts = (ops + 1) as i64;
    for id in (0..=ops).rev() {
        events.push(Event::cancel(ts, id));
        ts += 1;
    }
    events
}

fn bench_fold(c: &mut Criterion) {
    // Worst case for the cached maximum: every cancel removes the top.
    let events = ramp_events(1_000);
    c.bench_function("fold ramp 1k", |b| {
        b.iter(|| {
            let mut book = OrderBook::new();
            for event in &events {
                book.apply(*event).unwrap();
            }
            black_box(book.time_weighted_average_price())
        })
    });

    let mut log = Vec::new();
    simulate::write_random(
        &mut log,
        &RandomConfig {
            ops: 5_000,
            ..RandomConfig::default()
        },
    )
    .unwrap();
    c.bench_function("replay random 5k", |b| {
        b.iter(|| {
            let summary = replay(Cursor::new(&log)).unwrap();
            black_box(summary.time_weighted_average_price)
        })
    });
}

criterion_group!(benches, bench_fold);
criterion_main!(benches);
