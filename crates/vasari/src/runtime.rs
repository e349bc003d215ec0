//! Wires configuration into a ready-to-run sequencer.

use crate::{Transport, VasariConfig};
use tracing::{debug, info};
use vasari_error::{PlatformError, PlatformErrorKind, VasariResult};
use vasari_interface::{PlatformGateway, TextGenerator};
use vasari_models::ChatCompletionGenerator;
use vasari_retry::Retrying;
use vasari_sequencer::ActionSequencer;
use vasari_social::{DryRunGateway, GraphApiGateway, GraphSession};

/// Sequencer over the configured collaborators.
pub type ConfiguredSequencer = ActionSequencer<Box<dyn TextGenerator>, Box<dyn PlatformGateway>>;

/// Builds the sequencer described by `config`.
///
/// The generator and the Graph gateway are wrapped in [`Retrying`] with the
/// `[retry]` policy. The dry-run gateway never fails and is used as is.
///
/// # Errors
///
/// Returns an error if the API key is missing or the Graph transport has no
/// page id or access token.
pub fn build_sequencer(config: &VasariConfig) -> VasariResult<ConfiguredSequencer> {
    let policy = *config.retry();

    let generator = ChatCompletionGenerator::new(config.generator().clone())?;
    let generator: Box<dyn TextGenerator> = Box::new(Retrying::new(generator, policy));

    let page_id = config.run().page_id().clone();
    let gateway: Box<dyn PlatformGateway> = match config.platform().transport() {
        Transport::Graph => {
            let token = config.platform().access_token().clone().ok_or_else(|| {
                PlatformError::new(PlatformErrorKind::Authentication(
                    "Page access token is not set".to_string(),
                ))
            })?;
            let session = GraphSession::new(page_id, token);
            let gateway = GraphApiGateway::new(session, config.platform().graph().clone())?;
            Box::new(Retrying::new(gateway, policy))
        }
        Transport::DryRun => {
            info!("Dry run: writes will be logged, not sent");
            Box::new(DryRunGateway::new(page_id))
        }
    };

    debug!(
        provider = generator.provider_name(),
        transport = gateway.transport_name(),
        max_retries = policy.max_retries(),
        "Sequencer assembled"
    );

    Ok(ActionSequencer::new(
        generator,
        gateway,
        config.run().clone(),
    ))
}
