//! Configuration management for the CLI
//!
//! Defaults come from an optional JSON file and `POD_RESTARTS_*`
//! environment variables. Command-line flags override both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `POD_RESTARTS_THRESHOLD`
pub const ENV_PREFIX: &str = "POD_RESTARTS";

/// Default timeout for the pod listing, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Namespace to inspect (whole cluster if unset)
    pub namespace: Option<String>,
    /// Report per container instead of per pod
    pub containers: bool,
    /// Minimum restart threshold for pod reports
    pub threshold: i32,
    /// Sort key, empty for fetch order
    pub sort_by: String,
    /// Default output format
    pub format: Option<String>,
    /// Kubeconfig context
    pub context: Option<String>,
    /// Pod listing timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: None,
            containers: false,
            threshold: 0,
            sort_by: String::new(),
            format: None,
            context: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load configuration from the default file and the process environment
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok();
        Self::load_from(path.as_deref(), None)
    }

    /// Load configuration from `file` (if it exists) and environment
    /// variables. `env` replaces the process environment when given.
    pub fn load_from(file: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path.to_path_buf()).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("Failed to load configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("pod-restarts").join("config.json"))
    }
}
