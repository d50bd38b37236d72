//! Binary crate for the `oracle` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Serving the web form and formatting output

use clap::Parser;

mod cli;
mod logging;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
