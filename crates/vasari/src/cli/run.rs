//! Command handlers.

use std::sync::Arc;
use tracing::{info, warn};
use vasari::{VasariConfig, build_sequencer};
use vasari_sequencer::RunTrigger;
use vasari_server::{RunMetrics, TriggerState, create_router, spawn_scheduler};

/// Executes one run and prints the report.
///
/// An aborted run still prints the partial log before returning the error.
pub async fn run_once(config: VasariConfig, quota: Option<u32>) -> anyhow::Result<()> {
    let sequencer = build_sequencer(&config)?;
    let quota = quota.unwrap_or(*config.run().quota());

    match sequencer.run_once(quota).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(aborted) => {
            println!("{}", serde_json::to_string_pretty(&aborted.partial)?);
            Err(anyhow::anyhow!("{}", aborted))
        }
    }
}

/// Serves the run trigger until Ctrl+C.
pub async fn serve_trigger(config: VasariConfig, no_schedule: bool) -> anyhow::Result<()> {
    let trigger: Arc<dyn RunTrigger> = Arc::new(build_sequencer(&config)?);
    let metrics = RunMetrics::new();

    let scheduler = match config.schedule() {
        Some(schedule) if !no_schedule => {
            info!(schedule = ?schedule, "Starting scheduler");
            Some(spawn_scheduler(
                schedule.clone(),
                trigger.clone(),
                metrics.clone(),
            ))
        }
        Some(_) => {
            warn!("Schedule configured but disabled with --no-schedule");
            None
        }
        None => None,
    };

    let state = TriggerState::new(trigger, metrics);
    let router = create_router(state, config.server().trigger_path());
    let served = vasari_server::serve(config.server().bind(), router).await;

    if let Some(handle) = scheduler {
        handle.abort();
    }
    served?;
    Ok(())
}

/// Prints the effective configuration without secrets.
pub fn check_config(config: &VasariConfig) -> anyhow::Result<()> {
    print!("{}", config.to_redacted_toml()?);
    Ok(())
}
