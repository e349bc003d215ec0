//! Platform gateway transports for Vasari.
//!
//! Each transport is its own [`PlatformGateway`](vasari_interface::PlatformGateway)
//! implementation and is chosen by configuration:
//!
//! - [`GraphApiGateway`] talks to the official Graph API with a page access
//!   token.
//! - [`DryRunGateway`] reads nothing and only logs writes. Useful for
//!   checking a deployment's wiring without touching the page.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dry_run;
mod graph;

pub use dry_run::DryRunGateway;
pub use graph::{GraphApiGateway, GraphConfig, GraphSession};
