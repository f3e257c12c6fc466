//! Client settings loading.
//!
//! Settings are layered with the `config` crate, lowest precedence first:
//! - built-in defaults
//! - an optional settings file (TOML, YAML or JSON, by extension)
//! - environment variables prefixed `RESTKIT_` (e.g. `RESTKIT_BASE_URL`)

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use restkit_application::HttpClientError;
use restkit_domain::ResourceConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::adapters::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ReqwestHttpClient};

/// Prefix of the environment variables read by [`ClientSettings::load`].
pub const ENV_PREFIX: &str = "RESTKIT";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The origin is not an absolute URL.
    #[error("invalid origin `{origin}`: {message}")]
    InvalidOrigin {
        /// The rejected value
        origin: String,
        /// Parser message
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] HttpClientError),
}

/// Settings for the transport and the default resource options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Prefix for every resource route, becomes the `baseURL` option.
    pub base_url: Option<String>,
    /// Origin that root-relative base URLs resolve against.
    pub origin: Option<String>,
    /// Default request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientSettings {
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        Self {
            base_url: None,
            origin: None,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientSettings {
    /// Loads settings from an optional file and the `RESTKIT_*` environment.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Config` if the file is missing or malformed,
    /// or if a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "loading settings file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Returns the default request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the default resource options (`baseURL` when set).
    #[must_use]
    pub fn resource_config(&self) -> ResourceConfig {
        self.base_url
            .as_ref()
            .map_or_else(ResourceConfig::new, |base| {
                ResourceConfig::new().with_base_url(base.clone())
            })
    }

    /// Parses the configured origin.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidOrigin` if it is not an absolute URL.
    pub fn origin_url(&self) -> Result<Option<Url>, SettingsError> {
        self.origin
            .as_deref()
            .map(|origin| {
                Url::parse(origin).map_err(|e| SettingsError::InvalidOrigin {
                    origin: origin.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    /// Builds a reqwest transport from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is invalid or the client cannot be built.
    pub fn build_client(&self) -> Result<ReqwestHttpClient, SettingsError> {
        let mut client = ReqwestHttpClient::with_user_agent(&self.user_agent)?
            .with_default_timeout(self.timeout());
        if let Some(origin) = self.origin_url()? {
            client = client.with_origin(origin);
        }
        Ok(client)
    }
}
