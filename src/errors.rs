use std::io;

use thiserror::Error;

use crate::orders::OrderId;

/// Rejections raised by [`crate::orderbook::OrderBook::apply`].
#[derive(Error, Debug, PartialEq)]
pub enum BookError {
    #[error("cancel for unknown order id {0}")]
    OrderNotFound(OrderId),
}

/// A record that cannot be decoded into an event.
///
/// Carries the offending token verbatim so the line can be found in the log
/// by eye.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("empty record")]
    Empty,
    #[error("record ends before the {0} field")]
    Truncated(&'static str),
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),
    #[error("invalid order id `{0}`")]
    InvalidOrderId(String),
    #[error("invalid price `{0}`")]
    InvalidPrice(String),
    #[error("unknown event kind `{0}`")]
    UnknownKind(String),
    #[error("unexpected trailing field `{0}`")]
    TrailingField(String),
}

/// Failures while reading an event log and folding it through a book.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Malformed { line: usize, source: ParseError },
    #[error("line {line}: {source}")]
    Rejected { line: usize, source: BookError },
}
