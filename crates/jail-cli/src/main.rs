//! # jail
//!
//! Runs a single command inside fresh mount and PID namespaces and exits
//! with the command's status.

mod cli;
mod logging;

use anyhow::Context;
use clap::Parser;
use jail_common::types::CommandSpec;
use jail_runtime::engine::Jail;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format);

    let command = CommandSpec::new(cli.command).context("invalid command line")?;
    let code = Jail::new(command).run().context("jail failed")?;
    tracing::debug!(code, "jail finished");

    std::process::exit(code);
}
