//! Scheduled runs.
//!
//! A [`ScheduleType`] decides when the next run fires; [`spawn_scheduler`]
//! sleeps until then, runs once, and repeats. Scheduled runs are not
//! coordinated with HTTP-triggered ones.

use crate::{RunMetrics, run_and_record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use vasari_error::{ServerError, ServerErrorKind};
use vasari_sequencer::RunTrigger;

/// Trait for schedule types that can determine when runs fire.
pub trait Schedule {
    /// Calculate the next execution time after a given reference time.
    ///
    /// Returns `None` once the schedule is exhausted.
    fn next_execution(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>>;
}

/// When scheduled runs fire.
///
/// Configured as a tagged table, e.g.
/// `schedule = { type = "Cron", expression = "0 0 */6 * * * *" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ScheduleType {
    /// Cron expression (7 fields: sec min hour day month weekday year)
    ///
    /// Example: "0 0 9 * * * *" = 9 AM daily
    Cron {
        /// Cron expression string
        expression: String,
    },

    /// Fixed interval in seconds
    Interval {
        /// Interval duration in seconds
        seconds: u64,
    },

    /// A single run on startup
    Immediate,
}

impl ScheduleType {
    /// Checks that the schedule can ever fire.
    ///
    /// # Errors
    ///
    /// Returns [`ServerErrorKind::Schedule`] for an unparsable cron
    /// expression or a zero interval.
    pub fn validate(&self) -> Result<(), ServerError> {
        match self {
            ScheduleType::Cron { expression } => cron::Schedule::from_str(expression)
                .map(|_| ())
                .map_err(|e| {
                    ServerError::new(ServerErrorKind::Schedule(format!(
                        "'{}': {}",
                        expression, e
                    )))
                }),
            ScheduleType::Interval { seconds: 0 } => Err(ServerError::new(
                ServerErrorKind::Schedule("interval must be at least one second".to_string()),
            )),
            _ => Ok(()),
        }
    }
}

impl Schedule for ScheduleType {
    fn next_execution(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            ScheduleType::Immediate => None,
            ScheduleType::Interval { seconds } => {
                Some(after + chrono::Duration::seconds(*seconds as i64))
            }
            ScheduleType::Cron { expression } => cron::Schedule::from_str(expression)
                .ok()
                .and_then(|schedule| schedule.after(&after).next()),
        }
    }
}

/// Spawns the scheduling loop.
///
/// Each tick runs once through [`run_and_record`]. A failed run is logged
/// and the loop carries on with the next tick.
pub fn spawn_scheduler(
    schedule: ScheduleType,
    trigger: Arc<dyn RunTrigger>,
    metrics: RunMetrics,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if schedule == ScheduleType::Immediate {
            info!("Running once on startup");
            fire(trigger.as_ref(), &metrics).await;
            return;
        }

        loop {
            let now = Utc::now();
            let Some(next) = schedule.next_execution(now) else {
                warn!(schedule = ?schedule, "Schedule has no further executions");
                return;
            };
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next_run = %next, "Next scheduled run");
            tokio::time::sleep(wait).await;
            fire(trigger.as_ref(), &metrics).await;
        }
    })
}

async fn fire(trigger: &dyn RunTrigger, metrics: &RunMetrics) {
    match run_and_record(trigger, metrics).await {
        Ok(report) => info!(
            actions = report.log().len(),
            calls_remaining = report.calls_remaining(),
            "Scheduled run complete"
        ),
        Err(aborted) => error!(error = %aborted, "Scheduled run failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn interval_adds_seconds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let next = ScheduleType::Interval { seconds: 90 }.next_execution(start);
        assert_eq!(next, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 30).unwrap()));
    }

    #[test]
    fn cron_finds_next_hour() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 15, 0).unwrap();
        let schedule = ScheduleType::Cron {
            expression: "0 0 * * * * *".to_string(),
        };
        assert_eq!(
            schedule.next_execution(start),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap())
        );
    }

    #[test]
    fn immediate_has_no_next_run() {
        assert_eq!(ScheduleType::Immediate.next_execution(Utc::now()), None);
    }

    #[test]
    fn validate_rejects_bad_schedules() {
        let bad_cron = ScheduleType::Cron {
            expression: "every day".to_string(),
        };
        assert!(bad_cron.validate().is_err());
        assert!(ScheduleType::Interval { seconds: 0 }.validate().is_err());
        assert!(ScheduleType::Interval { seconds: 60 }.validate().is_ok());
    }

    #[test]
    fn deserializes_tagged_table() {
        let schedule: ScheduleType =
            serde_json::from_str(r#"{"type":"Interval","seconds":3600}"#).unwrap();
        assert_eq!(schedule, ScheduleType::Interval { seconds: 3600 });
    }
}
