//! Public entry point for running one command in a jail.

use jail_common::config::JailConfig;
use jail_common::error::Result;
use jail_common::types::CommandSpec;
use jail_core::kernel::{Kernel, LinuxKernel};

use crate::supervisor;

/// One jail invocation: a command plus the configuration to run it with.
///
/// Invocations share nothing; running the same `Jail` twice creates two
/// independent sets of namespaces.
#[derive(Debug, Clone)]
pub struct Jail {
    command: CommandSpec,
    config: JailConfig,
}

impl Jail {
    /// Creates a jail for `command` with the default configuration.
    #[must_use]
    pub fn new(command: CommandSpec) -> Self {
        Self {
            command,
            config: JailConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: JailConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the command run inside the jail.
    pub const fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> &JailConfig {
        &self.config
    }

    /// Runs the command on the real kernel and returns the exit code to report.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace child cannot be created or waited for.
    pub fn run(&self) -> Result<i32> {
        self.run_with(&LinuxKernel)
    }

    /// Runs the command against `kernel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace child cannot be created or waited for.
    pub fn run_with<K: Kernel>(&self, kernel: &K) -> Result<i32> {
        supervisor::supervise(kernel, &self.config, &self.command)
    }
}
