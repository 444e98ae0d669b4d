//! Fixed-capacity lap history, most recent first.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::time::Duration;

/// Number of laps kept.
pub const HISTORY_CAPACITY: usize = 10;

/// Header line of the saved history table.
pub const TABLE_HEADER: &str = "# nb\tmin\ts\tms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRing {
    entries: VecDeque<Duration>,
    capacity: usize,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRing {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// A ring pre-filled with `capacity` zero entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: std::iter::repeat(Duration::ZERO).take(capacity).collect(),
            capacity,
        }
    }

    /// Insert `lap` at the front, evicting the oldest entry when full.
    pub fn push(&mut self, lap: Duration) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(lap);
        self.entries.truncate(self.capacity);
    }

    /// Entry `index` places back from the most recent one.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Duration> {
        self.entries.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Duration> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tab-separated table: header, then `index, minutes, seconds, millis` per entry.
    #[must_use]
    pub fn to_table(&self) -> String {
        let mut out = String::with_capacity(16 * (self.len() + 1));
        out.push_str(TABLE_HEADER);
        out.push('\n');
        for (idx, lap) in self.iter().enumerate() {
            let (minutes, seconds, millis) = split_lap(lap);
            let _ = writeln!(out, "{:2}\t{minutes:04}\t{seconds:02}\t{millis:03}", idx + 1);
        }
        out
    }
}

/// Split into (total minutes, seconds within the minute, milliseconds).
fn split_lap(lap: Duration) -> (u64, u64, u32) {
    let secs = lap.as_secs();
    (secs / 60, secs % 60, lap.subsec_millis())
}

/// `MMMM:SS:mmm` form used on screen.
#[must_use]
pub fn format_lap(lap: Duration) -> String {
    let (minutes, seconds, millis) = split_lap(lap);
    format!("{minutes:04}:{seconds:02}:{millis:03}")
}

/// One numbered history panel line, e.g. ` 1. 0001:30:000`.
#[must_use]
pub fn format_entry(index: usize, lap: Duration) -> String {
    format!("{:2}. {}", index + 1, format_lap(lap))
}
