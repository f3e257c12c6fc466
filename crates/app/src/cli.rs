//! Command line definition.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use restkit_domain::{RequestConfig, SearchParams};
use serde_json::Value;

/// Call a REST resource from the command line.
#[derive(Debug, Parser)]
#[command(name = "restkit", version)]
pub struct Cli {
    /// Settings file (TOML, YAML or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Prefix for the route, overrides `base_url` from settings
    #[arg(long)]
    pub base_url: Option<String>,
    /// Origin for root-relative base URLs
    #[arg(long)]
    pub origin: Option<String>,
    /// Map payloads through a model
    #[arg(long, value_enum, default_value_t = ModelKind::Raw)]
    pub model: ModelKind,
    /// Extra header, as `Name: value` (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
    /// Timeout for this call in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Route of the resource, e.g. `users`
    pub route: String,
    #[command(subcommand)]
    pub command: Command,
}

/// Model applied to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelKind {
    /// Print payloads unchanged
    Raw,
    /// Map payloads to users
    User,
}

/// Operation to run on the resource.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one object
    Get {
        /// Primary key
        pk: String,
    },
    /// Search with `key=value` filters
    Search {
        /// Filters
        params: Vec<String>,
    },
    /// Create an object from a JSON document
    Create {
        /// JSON body
        body: String,
    },
    /// Replace an object with a JSON document
    Update {
        /// Primary key
        pk: String,
        /// JSON body
        body: String,
    },
    /// Delete an object
    Delete {
        /// Primary key
        pk: String,
    },
}

impl Cli {
    /// Builds the per-call request configuration from the flags.
    pub fn request_config(&self) -> anyhow::Result<RequestConfig> {
        let mut config = RequestConfig::new();
        for raw in &self.headers {
            let Some((name, value)) = raw.split_once(':') else {
                bail!("header must look like `Name: value`, got `{raw}`");
            };
            config = config.header(name.trim(), value.trim());
        }
        if let Some(ms) = self.timeout_ms {
            config = config.timeout(Duration::from_millis(ms));
        }
        Ok(config)
    }
}

/// Parses `key=value` filters into search parameters.
pub fn parse_search_params(raw: &[String]) -> anyhow::Result<SearchParams> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .with_context(|| format!("filter must look like `key=value`, got `{pair}`"))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map(|pairs| pairs.into_iter().collect())
}

/// Parses a JSON request body.
pub fn parse_body(raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).context("body is not valid JSON")
}
