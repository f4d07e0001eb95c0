//! Payment record and history representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single top-up transaction on a water account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Calendar date the transaction was recorded.
    pub date: NaiveDate,
    /// Monetary amount in currency units. Non-negative as supplied by the
    /// upstream service.
    pub cost: f64,
}

impl PaymentRecord {
    /// Creates a new payment record.
    #[must_use]
    pub const fn new(date: NaiveDate, cost: f64) -> Self {
        Self { date, cost }
    }
}

/// A non-empty sequence of payment records, newest first.
///
/// The ordering is exactly as returned by the upstream service and is never
/// re-sorted. The first record is the most recent top-up: its `cost` is the
/// currently credited amount, not a periodic charge, and the estimator
/// accounts for it separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PaymentHistory {
    records: Vec<PaymentRecord>,
}

impl PaymentHistory {
    /// Creates a history from upstream-ordered records.
    ///
    /// Returns `None` for an empty input; an empty history is a fetch
    /// failure, never a valid value.
    #[must_use]
    pub fn new(records: Vec<PaymentRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self { records })
    }

    /// Returns the most recent top-up (the first record).
    #[must_use]
    pub fn newest(&self) -> &PaymentRecord {
        &self.records[0]
    }

    /// Returns the oldest record in the fetched page (the last record).
    #[must_use]
    pub fn oldest(&self) -> &PaymentRecord {
        &self.records[self.records.len() - 1]
    }

    /// Returns all records, newest first.
    #[must_use]
    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; an empty history cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the absolute day distance between the newest and oldest
    /// record dates.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.newest().date - self.oldest().date).num_days().abs()
    }
}
