//! Logging arguments and tracing subscriber setup.

use crate::{CliError, CliResult};
use clap::{ArgAction, Args};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logging arguments shared by every binary.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LogArgs {
    /// Verbosity level: `-v` info, `-vv` debug, `-vvv` trace. Warnings are
    /// always shown.
    #[arg(long = "verbosity", short = 'v', action = ArgAction::Count, global = true)]
    pub verbosity: u8,
    /// Silences all log output.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl LogArgs {
    /// Returns the maximum level implied by the flags.
    pub const fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::OFF;
        }
        match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Installs the global tracing subscriber for these arguments.
    pub fn init_tracing(&self) -> CliResult<()> {
        init_tracing_subscriber(self.level(), None::<EnvFilter>)
    }
}

/// Installs a `fmt` subscriber writing to stderr.
///
/// Directives from `RUST_LOG` are applied on top of `level`; invalid ones
/// are skipped. An explicit `filter` replaces both.
pub fn init_tracing_subscriber(
    level: LevelFilter,
    filter: Option<impl Into<EnvFilter>>,
) -> CliResult<()> {
    let filter = match filter {
        Some(filter) => filter.into(),
        None => EnvFilter::builder().with_default_directive(level.into()).from_env_lossy(),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| CliError::Tracing(err.to_string()))
}
