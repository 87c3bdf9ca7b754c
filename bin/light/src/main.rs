//! `lumen-light` inspects the chain artifacts a light client store can serve.
//!
//! Every query goes through the on-demand retrieval layer with an offline
//! backend, so answers come from the local store only. Results are printed
//! as JSON on stdout; logs go to stderr.

mod cli;
mod commands;
mod flags;

use clap::Parser;

#[tokio::main]
async fn main() {
    lumen_cli::backtrace::enable();
    if let Err(err) = cli::Cli::parse().run().await {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
