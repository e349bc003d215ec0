//! Structured outcome of a run.

use crate::RunLog;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Structured outcome of one run.
///
/// Serializes as
/// `{"timestamp":"2024-05-01T12:00:00.000Z","callsRemaining":17,"log":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// When the run finished, UTC with millisecond precision.
    #[serde(with = "iso_millis")]
    timestamp: DateTime<Utc>,
    /// Quota left when the run finished.
    calls_remaining: u32,
    /// Completed actions, in order.
    log: RunLog,
}

impl RunReport {
    /// Assembles a report.
    pub fn new(timestamp: DateTime<Utc>, calls_remaining: u32, log: RunLog) -> Self {
        Self {
            timestamp,
            calls_remaining,
            log,
        }
    }

    /// Consumes the report, returning its log.
    pub fn into_log(self) -> RunLog {
        self.log
    }
}

/// Phases of a run, in the order they execute.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunState {
    /// Nothing has happened yet.
    #[default]
    NotStarted,
    /// Generating and publishing posts.
    Posting,
    /// Answering comments on recent posts.
    ReplyingComments,
    /// Answering unread conversation threads.
    ReplyingMessages,
    /// All phases finished.
    Done,
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
