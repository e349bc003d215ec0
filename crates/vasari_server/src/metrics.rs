//! Run metrics.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use vasari_core::{ActionKind, RunReport};
use vasari_sequencer::RunAborted;

/// Counters shared by every trigger path.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    inner: Arc<RunMetricsInner>,
}

#[derive(Debug, Default)]
struct RunMetricsInner {
    runs: AtomicU64,
    failures: AtomicU64,

    // Completed actions, including those from aborted runs
    posts: AtomicU64,
    comment_replies: AtomicU64,
    dm_replies: AtomicU64,

    last_calls_remaining: parking_lot::Mutex<Option<u32>>,
    last_success: parking_lot::Mutex<Option<Instant>>,
    last_error: parking_lot::Mutex<Option<String>>,
}

impl RunMetrics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one run.
    pub fn record(&self, outcome: &Result<RunReport, RunAborted>) {
        self.inner.runs.fetch_add(1, Ordering::Relaxed);
        match outcome {
            Ok(report) => {
                self.count_actions(report);
                *self.inner.last_calls_remaining.lock() = Some(*report.calls_remaining());
                *self.inner.last_success.lock() = Some(Instant::now());
            }
            Err(aborted) => {
                self.inner.failures.fetch_add(1, Ordering::Relaxed);
                self.count_actions(&aborted.partial);
                *self.inner.last_calls_remaining.lock() = Some(*aborted.partial.calls_remaining());
                *self.inner.last_error.lock() = Some(aborted.source.to_string());
            }
        }
    }

    fn count_actions(&self, report: &RunReport) {
        let log = report.log();
        self.inner
            .posts
            .fetch_add(log.count(ActionKind::PublishPost) as u64, Ordering::Relaxed);
        self.inner
            .comment_replies
            .fetch_add(log.count(ActionKind::ReplyComment) as u64, Ordering::Relaxed);
        self.inner
            .dm_replies
            .fetch_add(log.count(ActionKind::ReplyDm) as u64, Ordering::Relaxed);
    }

    /// Runs started.
    pub fn runs(&self) -> u64 {
        self.inner.runs.load(Ordering::Relaxed)
    }

    /// Runs that aborted.
    pub fn failures(&self) -> u64 {
        self.inner.failures.load(Ordering::Relaxed)
    }

    /// Time since the last run that finished without error.
    pub fn time_since_success(&self) -> Option<Duration> {
        self.inner.last_success.lock().map(|instant| instant.elapsed())
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            runs: self.runs(),
            failures: self.failures(),
            actions: ActionCounts {
                posts: self.inner.posts.load(Ordering::Relaxed),
                comment_replies: self.inner.comment_replies.load(Ordering::Relaxed),
                dm_replies: self.inner.dm_replies.load(Ordering::Relaxed),
            },
            last_calls_remaining: *self.inner.last_calls_remaining.lock(),
            seconds_since_success: self.time_since_success().map(|d| d.as_secs()),
            last_error: self.inner.last_error.lock().clone(),
        }
    }
}

/// Serializable snapshot of run metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Runs started
    pub runs: u64,
    /// Runs that aborted
    pub failures: u64,
    /// Completed actions by kind
    pub actions: ActionCounts,
    /// Calls left over by the most recent run
    pub last_calls_remaining: Option<u32>,
    /// Seconds since the last successful run
    pub seconds_since_success: Option<u64>,
    /// Message of the most recent failure
    pub last_error: Option<String>,
}

/// Completed actions by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    /// Posts published
    pub posts: u64,
    /// Comments answered
    pub comment_replies: u64,
    /// Direct messages answered
    pub dm_replies: u64,
}
