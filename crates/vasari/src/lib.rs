//! Vasari: spend a fixed budget of page actions on posts and replies.
//!
//! This crate ties the workspace together for the `vasari` binary:
//!
//! - [`VasariConfig`] / [`ConfigLoader`]: layered TOML and environment
//!   configuration
//! - [`build_sequencer`]: generator and gateway selection with retries
//! - [`init_observability_with_config`]: tracing subscriber setup
//!
//! The building blocks are re-exported for library users.
//!
//! ```no_run
//! use vasari::{VasariConfig, build_sequencer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VasariConfig::load(None)?.into_dry_run();
//! config.validate()?;
//! let report = build_sequencer(&config)?.run_once(*config.run().quota()).await?;
//! println!("{} calls left", report.calls_remaining());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;
mod runtime;

pub use config::{
    ConfigLoader, LoggingConfig, PlatformConfig, Secrets, ServerConfig, Transport, VasariConfig,
};
pub use observability::{ObservabilityConfig, init_observability_with_config};
pub use runtime::{ConfiguredSequencer, build_sequencer};

pub use vasari_core::*;
pub use vasari_error::*;
pub use vasari_interface::*;
pub use vasari_models::*;
pub use vasari_retry::*;
pub use vasari_sequencer::*;
pub use vasari_server::*;
pub use vasari_social::*;
