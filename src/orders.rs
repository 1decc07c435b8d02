/// Unique order identifier, as carried by the event log.
pub type OrderId = u64;

/// Integer event time. The log carries opaque monotone integers; nothing in
/// the book assumes a unit, only that later records never have smaller values.
pub type Timestamp = i64;

/// An order standing in the book.
///
/// Orders are immutable once placed: the log has no amend records, so the
/// only transitions are insert (created) and cancel (removed wholesale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub price: f64,
    /// Timestamp of the insert record that placed this order.
    pub placed_at: Timestamp,
}
