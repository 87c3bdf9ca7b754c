//! Prometheus metrics arguments.

use crate::{CliResult, init_prometheus_server};
use clap::Args;
use std::net::{IpAddr, Ipv4Addr};

/// Arguments controlling the Prometheus exporter.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MetricsArgs {
    /// Serves metrics over HTTP when set.
    #[arg(long = "metrics.enabled", global = true, env = "LUMEN_METRICS_ENABLED")]
    pub enabled: bool,
    /// Address the exporter listens on.
    #[arg(
        long = "metrics.addr",
        global = true,
        default_value = "0.0.0.0",
        env = "LUMEN_METRICS_ADDR"
    )]
    pub addr: IpAddr,
    /// Port the exporter listens on. Zero picks a free port.
    #[arg(long = "metrics.port", global = true, default_value = "9090", env = "LUMEN_METRICS_PORT")]
    pub port: u16,
}

impl Default for MetricsArgs {
    fn default() -> Self {
        Self { enabled: false, addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 9090 }
    }
}

impl MetricsArgs {
    /// Starts the exporter if enabled and runs `describe` to register metric
    /// descriptions.
    pub fn init_metrics(&self, describe: impl FnOnce()) -> CliResult<()> {
        if self.enabled {
            init_prometheus_server(self.addr, self.port)?;
            describe();
        }
        Ok(())
    }
}
