//! Run trigger surfaces for Vasari.
//!
//! - [`create_router`] exposes the trigger endpoint plus `/health` and
//!   `/metrics` over HTTP.
//! - [`spawn_scheduler`] fires runs on a cron expression or fixed interval.
//!
//! Both go through [`run_and_record`], so every run, however it was started,
//! lands in the same [`RunMetrics`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod metrics;
mod schedule;
mod server;

pub use api::{DEFAULT_TRIGGER_PATH, TriggerState, create_router, run_and_record};
pub use metrics::{ActionCounts, MetricsSnapshot, RunMetrics};
pub use schedule::{Schedule, ScheduleType, spawn_scheduler};
pub use server::serve;
