use std::collections::HashMap;

use tracing::debug;

use crate::errors::BookError;
use crate::events::{Event, EventKind};
use crate::orders::{Order, OrderId, Timestamp};

/// An [`OrderBook`] holds every **standing** order keyed by id, a cached
/// maximum over their prices, and the running accumulators behind
/// [`OrderBook::time_weighted_average_price`].
///
/// The cache obeys one rule: whenever the book is non-empty, `highest` equals
/// the true maximum price among standing orders, after every applied event.
/// Inserts maintain it in O(1); a cancel at (or tied with) the top pays an
/// O(n) rescan of the survivors, since only a rescan can tell what the new
/// maximum is.
#[derive(Debug)]
pub struct OrderBook {
    /// Standing orders: inserted but not yet cancelled.
    orders: HashMap<OrderId, Order>,
    /// Cached maximum price. `None` exactly while `orders` is empty.
    highest: Option<f64>,
    /// Timestamp of the last applied event. `None` until the first event,
    /// so a log may begin at any timestamp, negative included.
    clock: Option<Timestamp>,
    /// Sum over closed intervals of (elapsed time) x (highest price then).
    price_time: f64,
    /// Total elapsed time during which the book held at least one order.
    exposure: Timestamp,
}

impl OrderBook {
    /// Creates an empty book with zeroed accumulators.
    pub fn new() -> Self {
        OrderBook {
            orders: HashMap::new(),
            highest: None,
            clock: None,
            price_time: 0.0,
            exposure: 0,
        }
    }

    /// Applies one event from the log.
    ///
    /// # Behavior
    /// The clock advances first, against the **pre-event** state: the
    /// interval being closed belongs to the book as it stood before this
    /// event, so the accumulators take the old highest price. Only then does
    /// the insert or cancel mutate the book.
    ///
    /// # Errors
    /// [`BookError::OrderNotFound`] if a cancel names an id with no standing
    /// order. The clock has already advanced when this is returned; the
    /// order set is untouched.
    pub fn apply(&mut self, event: Event) -> Result<(), BookError> {
        self.advance_clock(event.timestamp);
        match event.kind {
            EventKind::Insert { price } => {
                self.insert(Order {
                    id: event.id,
                    price,
                    placed_at: event.timestamp,
                });
                Ok(())
            }
            EventKind::Cancel => {
                self.cancel(event.id)?;
                Ok(())
            }
        }
    }

    /// Closes the interval `[clock, now)` against the pre-event book, then
    /// moves the clock. Time spent with an empty book accrues nothing; the
    /// first event only starts the clock.
    fn advance_clock(&mut self, now: Timestamp) {
        if let Some(last) = self.clock {
            debug_assert!(now >= last, "events must arrive in timestamp order");
            if let Some(top) = self.highest {
                let elapsed = now - last;
                self.price_time += top * elapsed as f64;
                self.exposure += elapsed;
            }
        }
        self.clock = Some(now);
    }

    fn insert(&mut self, order: Order) {
        let Order { id, price, .. } = order;
        if let Some(displaced) = self.orders.insert(id, order) {
            // Overwriting an id silently retires the displaced order; if it
            // sat at the cached top, the survivors must be rescanned before
            // the new price is folded in.
            if matches!(self.highest, Some(top) if displaced.price >= top) {
                self.rebuild_highest();
                debug!(
                    "insert displaced order {} at the top, rescanned {} standing orders",
                    id,
                    self.orders.len()
                );
            }
        }
        self.highest = Some(match self.highest {
            Some(top) => top.max(price),
            None => price,
        });
    }

    fn cancel(&mut self, id: OrderId) -> Result<Order, BookError> {
        let removed = self
            .orders
            .remove(&id)
            .ok_or(BookError::OrderNotFound(id))?;
        match self.highest {
            // Cheap path: the removed order sat strictly below the top, so
            // the cached maximum still holds.
            Some(top) if removed.price < top => {}
            // At or tied with the top: rescan. A tie must rescan too, in
            // case another order still stands at the same price.
            _ => {
                self.rebuild_highest();
                debug!(
                    "cancel of order {} hit the top, rescanned {} standing orders",
                    id,
                    self.orders.len()
                );
            }
        }
        Ok(removed)
    }

    /// Rescans every standing order for the maximum price. O(n); paid only
    /// when a mutation may have removed the cached top.
    fn rebuild_highest(&mut self) {
        self.highest = self.orders.values().map(|o| o.price).reduce(f64::max);
    }

    /// Highest price among standing orders, or NaN while the book is empty.
    ///
    /// Never stale: cancelling the last order clears the cache rather than
    /// leaving the departed price behind.
    pub fn highest_price(&self) -> f64 {
        self.highest.unwrap_or(f64::NAN)
    }

    /// Time-weighted average of the highest price, over all time the book
    /// has spent non-empty so far.
    ///
    /// Until any exposure has accrued (no events yet, a single event, or all
    /// events sharing one timestamp) this is `0.0 / 0.0`, i.e. NaN. Callers
    /// treat that as a value, not a failure.
    pub fn time_weighted_average_price(&self) -> f64 {
        self.price_time / self.exposure as f64
    }

    /// Cumulative time during which the book held at least one order.
    pub fn total_time_exposed(&self) -> Timestamp {
        self.exposure
    }

    /// The standing order at `id`, if any.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Number of standing orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
