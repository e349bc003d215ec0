//! Logging setup for the `vasari` binary.
//!
//! Always installs an [`EnvFilter`] and a fmt layer (text or JSON). With the
//! `observability` feature an OpenTelemetry bridge exporting spans to stdout
//! is added as well.

use crate::LoggingConfig;
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Settings for [`init_observability_with_config`].
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name for telemetry attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON lines for log shippers
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Settings from the `[logging]` section. `verbose` forces `debug`.
    pub fn from_logging(logging: &LoggingConfig, verbose: bool) -> Self {
        let level = if verbose { "debug" } else { logging.level().as_str() };
        Self::default()
            .with_log_level(level)
            .with_json_logs(*logging.json())
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
///
/// # Errors
///
/// Fails if the level is not a valid filter directive or a global
/// subscriber is already installed.
pub fn init_observability_with_config(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = match env::var("RUST_LOG") {
        Ok(_) => EnvFilter::try_from_default_env()?,
        Err(_) => EnvFilter::try_new(&config.log_level)?,
    };

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    #[cfg(feature = "observability")]
    let registry = registry.with(otel_layer(&config));

    registry.try_init()?;
    Ok(())
}

#[cfg(feature = "observability")]
fn otel_layer<S>(config: &ObservabilityConfig) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::{KeyValue, global, trace::TracerProvider};
    use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
    use opentelemetry_stdout::SpanExporter;

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes(vec![KeyValue::new(
            "service.version",
            config.service_version.clone(),
        )])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer(config.service_name.clone());
    tracing_opentelemetry::layer().with_tracer(tracer)
}
