//! Command-line definition.

use std::ffi::OsString;

use clap::{ArgAction, Parser, ValueEnum};

/// Run a command in fresh mount and PID namespaces.
#[derive(Parser, Debug)]
#[command(name = "jail", version, about, long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Format of log lines written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Program path followed by its arguments, passed through verbatim.
    #[arg(value_name = "PROGRAM", trailing_var_arg = true, required = true)]
    pub command: Vec<OsString>,
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}
