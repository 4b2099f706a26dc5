//! Bounded history of recent rate calculations.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Currency;
use crate::calculations::RateCalculation;

/// Number of entries kept for the session chart.
pub const RATE_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateHistoryEntry {
    pub date: DateTime<Utc>,
    /// Unrounded hourly rate.
    pub rate: Decimal,
    pub currency: Currency,
}

/// FIFO of the most recent calculations. Recording into a full history
/// evicts the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct RateHistory {
    entries: VecDeque<RateHistoryEntry>,
    capacity: usize,
}

/// Serialized form. Replayed through [`RateHistory::record`] so a stored
/// history never exceeds its capacity.
#[derive(Deserialize)]
struct StoredHistory {
    entries: VecDeque<RateHistoryEntry>,
    capacity: usize,
}

impl From<StoredHistory> for RateHistory {
    fn from(stored: StoredHistory) -> Self {
        let mut history = Self::with_capacity(stored.capacity);
        for entry in stored.entries {
            history.record(entry);
        }
        history
    }
}

impl Default for RateHistory {
    fn default() -> Self {
        Self::with_capacity(RATE_HISTORY_CAPACITY)
    }
}

impl RateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `entry`, returning the evicted entry if the history was full.
    pub fn record(
        &mut self,
        entry: RateHistoryEntry,
    ) -> Option<RateHistoryEntry> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Records the unrounded hourly rate of `calculation` at `at`.
    pub fn record_calculation(
        &mut self,
        calculation: &RateCalculation,
        at: DateTime<Utc>,
    ) -> Option<RateHistoryEntry> {
        self.record(RateHistoryEntry {
            date: at,
            rate: calculation.breakdown.hourly_rate,
            currency: calculation.result.currency,
        })
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &RateHistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&RateHistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
