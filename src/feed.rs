//! Reads an event log and folds it through a single [`OrderBook`].

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::errors::FeedError;
use crate::events::{Event, EventKind};
use crate::orderbook::OrderBook;
use crate::orders::Timestamp;

/// Iterator over the records of an event log.
///
/// Yields one decoded [`Event`] per non-blank line, in file order.
/// Whitespace-only lines are skipped, so a trailing newline never turns into
/// a phantom record. Decode failures carry the 1-based line number of the
/// offending line.
pub struct EventReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        EventReader {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// 1-based number of the line the most recent item came from.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<Event, FeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(FeedError::Io(err))),
            };
            self.line += 1;
            let record = line.trim();
            if record.is_empty() {
                continue;
            }
            return Some(record.parse().map_err(|source| FeedError::Malformed {
                line: self.line,
                source,
            }));
        }
    }
}

/// What a full replay produced.
///
/// Serializes cleanly to JSON; the non-finite cases (an empty final book, a
/// zero-exposure average) come out as `null`.
#[derive(Debug, Serialize)]
pub struct ReplaySummary {
    pub events: usize,
    pub inserts: usize,
    pub cancels: usize,
    pub open_orders: usize,
    pub time_exposed: Timestamp,
    pub highest_price: f64,
    pub time_weighted_average_price: f64,
}

impl ReplaySummary {
    /// The one-line report the `twap` binary prints.
    pub fn report(&self) -> String {
        format!(
            "Time weighted average price is {}",
            self.time_weighted_average_price
        )
    }
}

/// Folds every record of `reader` through a fresh book, in file order.
///
/// Stops at the first undecodable record or rejected event; the error names
/// the offending line. No partial summary is returned.
pub fn replay<R: BufRead>(reader: R) -> Result<ReplaySummary, FeedError> {
    let mut book = OrderBook::new();
    let mut inserts = 0;
    let mut cancels = 0;

    let mut events = EventReader::new(reader);
    while let Some(event) = events.next() {
        let event = event?;
        match event.kind {
            EventKind::Insert { .. } => inserts += 1,
            EventKind::Cancel => cancels += 1,
        }
        book.apply(event).map_err(|source| FeedError::Rejected {
            line: events.line(),
            source,
        })?;
    }

    debug!(
        "folded {} events ({} inserts, {} cancels), {} still standing",
        inserts + cancels,
        inserts,
        cancels,
        book.len()
    );
    Ok(ReplaySummary {
        events: inserts + cancels,
        inserts,
        cancels,
        open_orders: book.len(),
        time_exposed: book.total_time_exposed(),
        highest_price: book.highest_price(),
        time_weighted_average_price: book.time_weighted_average_price(),
    })
}

/// Opens `path` and replays its contents. See [`replay`].
pub fn replay_path(path: impl AsRef<Path>) -> Result<ReplaySummary, FeedError> {
    let file = File::open(path)?;
    replay(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reader_skips_blank_lines_and_numbers_the_rest() {
        let log = "\n 10 I 1 5.0\n\n12 E 1\n";
        let mut reader = EventReader::new(Cursor::new(log));

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first, Event::insert(10, 1, 5.0));
        assert_eq!(reader.line(), 2);

        let second = reader.next().unwrap().unwrap();
        assert_eq!(second, Event::cancel(12, 1));
        assert_eq!(reader.line(), 4);

        assert!(reader.next().is_none());
    }

    #[test]
    fn reader_wraps_decode_failures_with_the_line_number() {
        let mut reader = EventReader::new(Cursor::new("10 I 1 5.0\nnot a record\n"));
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "line 2: invalid timestamp `not`");
    }

    #[test]
    fn report_prints_the_expected_sentence() {
        let summary = replay(Cursor::new("5 I 1 2.0\n7 E 1\n")).unwrap();
        assert_eq!(summary.report(), "Time weighted average price is 2");
    }
}
