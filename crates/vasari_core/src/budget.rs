//! Per-run call budget.

use crate::{LogEntry, RunLog, RunReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vasari_error::BudgetError;

/// Remaining write actions permitted in the current run.
///
/// A quota only ever goes down, one call per successful write, and never
/// below zero.
///
/// # Examples
///
/// ```
/// use vasari_core::Quota;
///
/// let mut quota = Quota::new(2);
/// assert!(quota.covers(2));
/// assert!(quota.try_spend());
/// assert_eq!(quota.phase_cap(9), 1);
/// assert!(quota.try_spend());
/// assert!(quota.is_exhausted());
/// assert!(!quota.try_spend());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("{}", remaining)]
pub struct Quota {
    remaining: u32,
}

impl Quota {
    /// Creates a quota of `calls` write actions.
    pub const fn new(calls: u32) -> Self {
        Self { remaining: calls }
    }

    /// Calls still available.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True once every call has been spent.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// True if at least `calls` writes are still available.
    pub fn covers(&self, calls: u32) -> bool {
        self.remaining >= calls
    }

    /// Upper bound on actions a phase may take: `min(cap, remaining)`.
    pub fn phase_cap(&self, cap: u32) -> u32 {
        self.remaining.min(cap)
    }

    /// Spends one call. Returns `false` (and changes nothing) when exhausted.
    pub fn try_spend(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(rest) => {
                self.remaining = rest;
                true
            }
            None => false,
        }
    }
}

/// Quota and run log kept in lockstep.
///
/// Every recorded entry spends exactly one call, so
/// `remaining() == initial() - log().len()` holds at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct CallLedger {
    initial: u32,
    quota: Quota,
    log: RunLog,
}

impl CallLedger {
    /// Opens a ledger for a run allowed `initial` write actions.
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            quota: Quota::new(initial),
            log: RunLog::default(),
        }
    }

    /// Quota the run started with.
    pub fn initial(&self) -> u32 {
        self.initial
    }

    /// Current quota.
    pub fn quota(&self) -> Quota {
        self.quota
    }

    /// Calls still available.
    pub fn remaining(&self) -> u32 {
        self.quota.remaining()
    }

    /// Completed actions so far.
    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// Records a completed write, spending one call.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError`] if the quota is already exhausted; the entry
    /// is not recorded in that case.
    pub fn record(&mut self, entry: LogEntry) -> Result<(), BudgetError> {
        if !self.quota.try_spend() {
            return Err(BudgetError::exhausted(self.initial));
        }
        self.log.push(entry);
        Ok(())
    }

    /// Closes the ledger into a report stamped with `timestamp`.
    pub fn into_report(self, timestamp: DateTime<Utc>) -> RunReport {
        RunReport::new(timestamp, self.quota.remaining(), self.log)
    }
}
