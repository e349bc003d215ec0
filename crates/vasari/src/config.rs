//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from vasari.toml)
//! - `vasari/vasari.toml` in the user config directory
//! - An explicit `--config` file, or `./vasari.toml`
//! - `VASARI_<SECTION>__<KEY>` environment variables
//! - The secrets `API_KEY`, `PAGE_ID` and `PAGE_ACCESS_TOKEN`

use config::{Config, Environment, File, FileFormat, Map};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use vasari_error::{ConfigError, VasariResult};
use vasari_models::GeneratorConfig;
use vasari_retry::RetryPolicy;
use vasari_sequencer::SequencerConfig;
use vasari_server::ScheduleType;
use vasari_social::GraphConfig;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../vasari.toml");

/// Complete configuration for the `vasari` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct VasariConfig {
    /// Run policy and content
    run: SequencerConfig,
    /// Text generator settings
    generator: GeneratorConfig,
    /// Platform transport selection
    platform: PlatformConfig,
    /// Retry policy applied to every collaborator call
    retry: RetryPolicy,
    /// HTTP trigger settings
    server: ServerConfig,
    /// Optional run schedule for `vasari serve`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule: Option<ScheduleType>,
    /// Log output settings
    logging: LoggingConfig,
}

/// Available platform transports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Transport {
    /// Official Graph API with a page access token
    #[default]
    Graph,
    /// Log writes without sending them
    DryRun,
}

/// Platform transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct PlatformConfig {
    /// Which transport to use
    transport: Transport,
    /// Page access token, normally from `PAGE_ACCESS_TOKEN`
    #[serde(skip_serializing)]
    access_token: Option<String>,
    /// Graph API connection settings
    graph: GraphConfig,
}

/// HTTP trigger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    bind: String,
    /// Path of the run trigger endpoint
    trigger_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            trigger_path: vasari_server::DEFAULT_TRIGGER_PATH.to_string(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (e.g., "info", "vasari=debug")
    level: String,
    /// Emit JSON lines instead of human-readable text
    json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Secret values kept out of configuration files.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    /// Generator API key
    pub api_key: Option<String>,
    /// Page id
    pub page_id: Option<String>,
    /// Page access token
    pub page_access_token: Option<String>,
}

impl Secrets {
    /// Reads `API_KEY`, `PAGE_ID` and `PAGE_ACCESS_TOKEN`.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_key: read("API_KEY"),
            page_id: read("PAGE_ID"),
            page_access_token: read("PAGE_ACCESS_TOKEN"),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = |v: &Option<String>| if v.is_some() { "[SET]" } else { "[UNSET]" };
        f.debug_struct("Secrets")
            .field("api_key", &shown(&self.api_key))
            .field("page_id", &self.page_id)
            .field("page_access_token", &shown(&self.page_access_token))
            .finish()
    }
}

/// Assembles a [`VasariConfig`] from its layered sources.
///
/// ```no_run
/// use vasari::ConfigLoader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ConfigLoader::new().file("deploy/vasari.toml").load()?;
/// config.validate()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    user_dir: bool,
    environment: Option<Map<String, String>>,
    read_environment: bool,
    secrets: Option<Secrets>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader over every source, reading the process environment.
    pub fn new() -> Self {
        Self {
            file: None,
            user_dir: true,
            environment: None,
            read_environment: true,
            secrets: None,
        }
    }

    /// Uses `path` instead of `./vasari.toml`. The file must exist.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skips the user config directory.
    pub fn without_user_dir(mut self) -> Self {
        self.user_dir = false;
        self
    }

    /// Reads `VASARI_*` variables from `vars` instead of the process
    /// environment.
    pub fn environment(mut self, vars: Map<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }

    /// Ignores `VASARI_*` variables entirely.
    pub fn without_environment(mut self) -> Self {
        self.read_environment = false;
        self
    }

    /// Uses these secrets instead of reading them from the environment.
    pub fn secrets(mut self, secrets: Secrets) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Builds and deserializes the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a file cannot be read or a value has
    /// the wrong type. Call [`VasariConfig::validate`] afterwards for
    /// semantic checks.
    #[instrument(skip(self), fields(file = ?self.file))]
    pub fn load(self) -> VasariResult<VasariConfig> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if self.user_dir {
            if let Some(dir) = dirs::config_dir() {
                let user_config = dir.join("vasari").join("vasari.toml");
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        builder = match &self.file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::with_name("vasari").required(false)),
        };

        if self.read_environment {
            builder = builder.add_source(
                Environment::with_prefix("VASARI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(self.environment.clone()),
            );
        }

        let secrets = self.secrets.unwrap_or_else(Secrets::from_env);
        builder = builder
            .set_override_option("generator.api_key", secrets.api_key)
            .and_then(|b| b.set_override_option("run.page_id", secrets.page_id))
            .and_then(|b| {
                b.set_override_option("platform.access_token", secrets.page_access_token)
            })
            .map_err(|e| ConfigError::new(format!("Failed to apply secrets: {}", e)))?;

        let config: VasariConfig = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        debug!(transport = %config.platform.transport, "Configuration loaded");
        Ok(config)
    }
}

impl VasariConfig {
    /// Loads from every source, with `file` in place of `./vasari.toml`.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load`].
    pub fn load(file: Option<&Path>) -> VasariResult<Self> {
        let loader = ConfigLoader::new();
        match file {
            Some(path) => loader.file(path).load(),
            None => loader.load(),
        }
    }

    /// Checks the values a run depends on.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: zero quota or phase cap, missing page
    /// id, post prompt, fallback text or API key, a Graph transport without
    /// an access token, a trigger path without a leading `/`, or an invalid
    /// schedule.
    pub fn validate(&self) -> VasariResult<()> {
        if *self.run.quota() == 0 {
            return Err(ConfigError::new("run.quota must be greater than zero").into());
        }
        if *self.run.phase_cap() == 0 {
            return Err(ConfigError::new("run.phase_cap must be greater than zero").into());
        }
        if self.run.page_id().trim().is_empty() {
            return Err(ConfigError::new("run.page_id is empty (set PAGE_ID)").into());
        }
        if self.run.post_prompt().trim().is_empty() {
            return Err(ConfigError::new("run.post_prompt is empty").into());
        }
        if self.generator.fallback_text().trim().is_empty() {
            return Err(ConfigError::new("generator.fallback_text is empty").into());
        }
        let has_api_key = self
            .generator
            .api_key()
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_api_key {
            return Err(ConfigError::new("generator API key is missing (set API_KEY)").into());
        }
        if self.platform.transport == Transport::Graph {
            let has_token = self
                .platform
                .access_token
                .as_deref()
                .is_some_and(|token| !token.trim().is_empty());
            if !has_token {
                return Err(ConfigError::new(
                    "graph transport needs a page access token (set PAGE_ACCESS_TOKEN)",
                )
                .into());
            }
        }
        if !self.server.trigger_path.starts_with('/') {
            return Err(ConfigError::new("server.trigger_path must start with '/'").into());
        }
        if let Some(schedule) = &self.schedule {
            schedule.validate()?;
        }
        Ok(())
    }

    /// Switches to the dry-run transport.
    pub fn into_dry_run(mut self) -> Self {
        self.platform.transport = Transport::DryRun;
        self
    }

    /// Replaces the listen address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.server.bind = bind.into();
        self
    }

    /// Effective configuration as TOML, without secrets.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if serialization fails.
    pub fn to_redacted_toml(&self) -> VasariResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to render configuration: {}", e)).into())
    }
}
