//! The event log's record type and its text encoding.

use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;
use crate::orders::{OrderId, Timestamp};

/// What a record does to the book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// Place an order at this record's id. An id already in the book is
    /// overwritten, which silently retires the old order.
    Insert { price: f64 },
    /// Remove the standing order at this record's id.
    Cancel,
}

/// One decoded event log record.
///
/// The wire form is a single whitespace-separated line:
///
/// ```text
/// <timestamp> I <order_id> <price>
/// <timestamp> E <order_id>
/// ```
///
/// Timestamps may be any `i64`; prices must be finite. [`fmt::Display`]
/// renders the same line back, so a log can be regenerated from decoded
/// events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub timestamp: Timestamp,
    pub id: OrderId,
    pub kind: EventKind,
}

impl Event {
    pub fn insert(timestamp: Timestamp, id: OrderId, price: f64) -> Self {
        Event {
            timestamp,
            id,
            kind: EventKind::Insert { price },
        }
    }

    pub fn cancel(timestamp: Timestamp, id: OrderId) -> Self {
        Event {
            timestamp,
            id,
            kind: EventKind::Cancel,
        }
    }
}

impl FromStr for Event {
    type Err = ParseError;

    /// Decodes one record. Leading, trailing and repeated whitespace between
    /// fields is tolerated; anything after the last expected field is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();

        let raw_ts = fields.next().ok_or(ParseError::Empty)?;
        let timestamp: Timestamp = raw_ts
            .parse()
            .map_err(|_| ParseError::InvalidTimestamp(raw_ts.into()))?;

        let raw_kind = fields.next().ok_or(ParseError::Truncated("event kind"))?;

        let raw_id = fields.next().ok_or(ParseError::Truncated("order id"))?;
        let id: OrderId = raw_id
            .parse()
            .map_err(|_| ParseError::InvalidOrderId(raw_id.into()))?;

        let kind = match raw_kind {
            "I" => {
                let raw_price = fields.next().ok_or(ParseError::Truncated("price"))?;
                let price: f64 = raw_price
                    .parse()
                    .map_err(|_| ParseError::InvalidPrice(raw_price.into()))?;
                // NaN or infinite prices would poison the cached maximum.
                if !price.is_finite() {
                    return Err(ParseError::InvalidPrice(raw_price.into()));
                }
                EventKind::Insert { price }
            }
            "E" => EventKind::Cancel,
            other => return Err(ParseError::UnknownKind(other.into())),
        };

        if let Some(extra) = fields.next() {
            return Err(ParseError::TrailingField(extra.into()));
        }

        Ok(Event {
            timestamp,
            id,
            kind,
        })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EventKind::Insert { price } => {
                write!(f, "{} I {} {}", self.timestamp, self.id, price)
            }
            EventKind::Cancel => write!(f, "{} E {}", self.timestamp, self.id),
        }
    }
}
