//! Replay a time-ordered order event log and measure the time-weighted
//! average of the highest standing price.
//!
//! [`orderbook::OrderBook`] owns the core state machine; [`feed`] decodes a
//! log and folds it through a book; [`simulate`] writes synthetic logs for
//! tests and benches; [`cli`] fronts the `twap` binary.

pub mod cli;
pub mod errors;
pub mod events;
pub mod feed;
pub mod orderbook;
pub mod orders;
pub mod simulate;
