//! Core data types for the Vasari page automation workspace.
//!
//! This crate holds the vocabulary shared by the sequencer and its
//! collaborators: the call budget, the run log, the read-only platform
//! views and the structured run report.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod budget;
mod log;
mod report;
mod views;

pub use budget::{CallLedger, Quota};
pub use log::{ActionKind, LogEntry, Receipt, RunLog};
pub use report::{RunReport, RunState};
pub use views::{Comment, ConversationThread, DirectMessage, Post};
