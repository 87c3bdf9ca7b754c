//! Global arguments for the CLI.

use anyhow::Context;
use clap::Args;
use lumen_cli::{LogArgs, MetricsArgs};
use lumen_odr::OdrConfig;
use std::path::{Path, PathBuf};

/// Global arguments for the CLI.
#[derive(Args, Debug, Clone)]
pub(crate) struct GlobalArgs {
    /// Directory of the light client database.
    #[arg(long, global = true, env = "LUMEN_DATADIR", default_value = "lumen-data")]
    pub(crate) datadir: PathBuf,
    /// TOML file with the retrieval configuration.
    #[arg(long, global = true, env = "LUMEN_CONFIG")]
    pub(crate) config: Option<PathBuf>,
    /// Timeout of remote requests in milliseconds, overriding the config file.
    #[arg(long = "request-timeout", global = true, env = "LUMEN_REQUEST_TIMEOUT")]
    pub(crate) request_timeout: Option<u64>,
    /// Logging arguments.
    #[command(flatten)]
    pub(crate) log: LogArgs,
    /// Prometheus arguments.
    #[command(flatten)]
    pub(crate) metrics: MetricsArgs,
}

impl GlobalArgs {
    /// Loads the configuration file, if any, and applies flag overrides.
    pub(crate) fn odr_config(&self) -> anyhow::Result<OdrConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => OdrConfig::default(),
        };
        if let Some(timeout) = self.request_timeout {
            config.request_timeout = Some(timeout);
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> anyhow::Result<OdrConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
}
