//! Writes synthetic event logs for exercising the replay pipeline.
//!
//! Two workload shapes:
//!
//! - [`write_ramp`]: `ops + 1` inserts at strictly ascending ids and prices,
//!   then `ops + 1` cancels in reverse id order. Every cancel removes the
//!   current maximum, so the rescan path runs on each one. Replaying the
//!   ramp yields an average of `(ops + 1)^2 / (2 * ops + 1)`, handy as a
//!   closed-form check on large logs.
//! - [`write_random`]: a seeded stochastic mix. Inter-arrival gaps draw from
//!   `Exp(arrival_rate)`, the local mid price drifts by `N(0, noise_sigma)`
//!   per event, and each step either inserts a fresh id near the mid or
//!   cancels a uniformly chosen live id. The log ends by draining every
//!   live order, so a replayed book always finishes empty.

use std::io::{self, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

use crate::events::Event;
use crate::orders::{OrderId, Timestamp};

/// Parameters for [`write_random`].
#[derive(Debug, Clone)]
pub struct RandomConfig {
    /// Number of insert/cancel records before the final drain.
    pub ops: u64,
    /// Generator seed; the same seed writes byte-identical logs.
    pub seed: u64,
    /// Rate of the exponential inter-arrival gaps (events per time unit).
    pub arrival_rate: f64,
    /// Standard deviation of the Gaussian mid-price drift per event.
    pub noise_sigma: f64,
    /// Mid price the walk starts from.
    pub start_price: f64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        RandomConfig {
            ops: 10_000,
            seed: 42,
            arrival_rate: 0.8,
            noise_sigma: 0.5,
            start_price: 50.0,
        }
    }
}

/// Writes the ramp workload: inserts at ids `0..=ops` with price `id + 1` at
/// timestamp `id`, then cancels from id `ops` back down to 0, one timestamp
/// apart. Returns the number of records written.
pub fn write_ramp<W: Write>(out: &mut W, ops: u64) -> io::Result<u64> {
    for i in 0..=ops {
        writeln!(out, "{}", Event::insert(i as Timestamp, i, (i + 1) as f64))?;
    }
    let mut ts = (ops + 1) as Timestamp;
    for id in (0..=ops).rev() {
        writeln!(out, "{}", Event::cancel(ts, id))?;
        ts += 1;
    }
    Ok(2 * (ops + 1))
}

/// Writes a seeded random workload. Returns the number of records written,
/// including the final drain.
pub fn write_random<W: Write>(out: &mut W, cfg: &RandomConfig) -> io::Result<u64> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let gap = Exp::new(cfg.arrival_rate).expect("arrival_rate must be > 0");
    let drift = Normal::new(0.0, cfg.noise_sigma).expect("noise sigma >= 0");

    let mut ts: Timestamp = 0;
    let mut mid = cfg.start_price;
    let mut live: Vec<OrderId> = Vec::new();
    let mut next_id: OrderId = 0;
    let mut written: u64 = 0;

    for _ in 0..cfg.ops {
        // Timestamps must be non-decreasing; integer time means rounding
        // the drawn gap up so consecutive records never collide.
        ts += (gap.sample(&mut rng).ceil() as Timestamp).max(1);
        mid += drift.sample(&mut rng);

        if !live.is_empty() && rng.random_bool(0.4) {
            let slot = rng.random_range(0..live.len());
            let id = live.swap_remove(slot);
            writeln!(out, "{}", Event::cancel(ts, id))?;
        } else {
            let price = mid.max(0.01);
            writeln!(out, "{}", Event::insert(ts, next_id, price))?;
            live.push(next_id);
            next_id += 1;
        }
        written += 1;
    }

    // Drain whatever is still standing so the replayed book ends empty.
    for id in live.drain(..) {
        ts += 1;
        writeln!(out, "{}", Event::cancel(ts, id))?;
        written += 1;
    }

    Ok(written)
}
