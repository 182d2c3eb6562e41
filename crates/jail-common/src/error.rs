//! Unified error type for the jail workspace.
//!
//! Every variant is a setup failure: the process that observes it reports
//! the error on stderr and terminates with [`EXIT_SETUP_FAILURE`]. There is
//! no local recovery anywhere.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::constants::EXIT_SETUP_FAILURE;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum JailError {
    /// Creating the mount + PID namespace child failed.
    #[error("namespace creation failed: {source}")]
    Spawn {
        /// Underlying OS error.
        source: io::Error,
    },

    /// A step of the mount chain failed.
    #[error("{operation} on {} failed: {source}", .target.display())]
    Mount {
        /// Human-readable name of the mount operation.
        operation: &'static str,
        /// Mount point the operation targeted.
        target: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Forking the root command process failed.
    #[error("fork failed: {source}")]
    Fork {
        /// Underlying OS error.
        source: io::Error,
    },

    /// Replacing the process image with the target failed.
    #[error("execve {program} failed: {source}")]
    Exec {
        /// Program path as given on the command line.
        program: String,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Waiting for a child process failed.
    #[error("waitpid({pid}) failed: {source}")]
    Wait {
        /// Process the wait targeted.
        pid: i32,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Installing a signal disposition failed.
    #[error("installing {signal} handler failed: {source}")]
    Signal {
        /// Name of the signal.
        signal: String,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Setting the process label failed.
    #[error("setting process name {name:?} failed: {source}")]
    ProcessName {
        /// Requested label.
        name: String,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The command line cannot be turned into an exec vector.
    #[error("invalid command: {message}")]
    InvalidCommand {
        /// Description of the problem.
        message: String,
    },
}

impl JailError {
    /// Process exit code used when this error terminates a jail process.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Spawn { .. }
            | Self::Mount { .. }
            | Self::Fork { .. }
            | Self::Exec { .. }
            | Self::Wait { .. }
            | Self::Signal { .. }
            | Self::ProcessName { .. }
            | Self::InvalidCommand { .. } => EXIT_SETUP_FAILURE,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, JailError>;
