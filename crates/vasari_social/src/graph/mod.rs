//! Graph API transport.

mod client;
mod config;
mod dto;

pub use client::GraphApiGateway;
pub use config::{GraphConfig, GraphSession};
