//! Run outcome types and the trigger seam.

use crate::ActionSequencer;
use async_trait::async_trait;
use vasari_core::{RunReport, RunState};
use vasari_error::VasariError;
use vasari_interface::{PlatformGateway, TextGenerator};

/// A run that stopped on its first failure.
///
/// Writes completed before the failure were applied and are listed in
/// `partial`; nothing is rolled back.
#[derive(Debug, derive_more::Error)]
pub struct RunAborted {
    /// The failure that stopped the run
    pub source: VasariError,
    /// Phase the run was in when it failed
    pub failed_in: RunState,
    /// Report of the actions completed before the failure
    pub partial: RunReport,
}

impl std::fmt::Display for RunAborted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Run aborted while {} after {} completed actions: {}",
            self.failed_in,
            self.partial.log().len(),
            self.source
        )
    }
}

/// Something that can start one run on demand.
///
/// The HTTP endpoint and the scheduler hold a `dyn RunTrigger` so they do not
/// depend on the concrete generator and gateway.
#[async_trait]
pub trait RunTrigger: Send + Sync {
    /// Executes one run with the configured quota.
    async fn trigger(&self) -> Result<RunReport, RunAborted>;
}

#[async_trait]
impl<G, P> RunTrigger for ActionSequencer<G, P>
where
    G: TextGenerator,
    P: PlatformGateway,
{
    async fn trigger(&self) -> Result<RunReport, RunAborted> {
        self.run_once(*self.config().quota()).await
    }
}
