//! Init process of the jail's PID namespace.
//!
//! As PID 1 the init inherits every orphan in the namespace, so it reaps
//! all descendants, not only the root command. Only the root command's
//! status is kept.
//!
//! State machine:
//!
//! ```text
//! Running --(no children left)--> Terminated(record.exit_code())
//! Running --(termination signal)--> Terminated(published code)
//! ```
//!
//! The signal transition happens inside the handler installed by
//! [`Kernel::install_termination_handler`]: it exits with the code last
//! published by the reap loop and never returns to it. Descendants are not
//! signaled on either path.

use jail_common::config::JailConfig;
use jail_common::constants::EXIT_SUCCESS;
use jail_common::types::ExitStatusRecord;
use jail_core::kernel::Kernel;
use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;

use crate::status;

/// Signal that stops the init process early.
pub const TERMINATION_SIGNAL: Signal = Signal::SIGTERM;

/// Lifecycle of the init process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// Blocking in the reap loop.
    Running,
    /// Done; the process exits with this code.
    Terminated(i32),
}

/// Reap loop state for one PID namespace.
#[derive(Debug)]
pub struct Reaper<'k, K: Kernel> {
    kernel: &'k K,
    root: Pid,
    record: ExitStatusRecord,
    state: InitState,
    reaped: usize,
}

impl<'k, K: Kernel> Reaper<'k, K> {
    /// Creates a reaper tracking `root` as the root command.
    pub const fn new(kernel: &'k K, root: Pid) -> Self {
        Self {
            kernel,
            root,
            record: ExitStatusRecord::NoneObserved,
            state: InitState::Running,
            reaped: 0,
        }
    }

    /// Returns the root command's last observed status.
    pub const fn record(&self) -> ExitStatusRecord {
        self.record
    }

    /// Returns the current state.
    pub const fn state(&self) -> InitState {
        self.state
    }

    /// Returns how many processes have been reaped so far.
    pub const fn reaped(&self) -> usize {
        self.reaped
    }

    /// Accounts for one reaped process.
    ///
    /// Only the root command updates the record; orphans are discarded.
    pub fn observe(&mut self, status: WaitStatus) {
        self.reaped += 1;
        match status.pid() {
            Some(pid) if pid == self.root => {
                self.record = status::classify(status);
                self.kernel.publish_exit_code(self.record.exit_code());
                tracing::info!(%pid, record = %self.record, "root command finished");
            }
            pid => tracing::debug!(?pid, "reaped orphaned descendant"),
        }
    }

    /// Reaps until no children remain and returns the final exit code.
    ///
    /// A failing wait ends the loop as if no children were left.
    pub fn run(&mut self) -> i32 {
        loop {
            if let InitState::Terminated(code) = self.state {
                return code;
            }
            match self.kernel.reap_next_child() {
                Ok(Some(status)) => self.observe(status),
                Ok(None) => self.finish(),
                Err(err) => {
                    tracing::warn!(%err, "reap loop aborted");
                    self.finish();
                }
            }
        }
    }

    fn finish(&mut self) {
        let code = self.record.exit_code();
        tracing::debug!(reaped = self.reaped, code, "no children left");
        self.state = InitState::Terminated(code);
    }
}

/// Runs the init process for `root` and exits with the jail's code.
///
/// Never returns: every path ends in [`Kernel::terminate`].
pub fn run_init<K: Kernel>(kernel: &K, config: &JailConfig, root: Pid) -> ! {
    if let Err(err) = kernel.set_process_name(&config.init_name) {
        tracing::debug!(%err, "process label not set");
    }

    kernel.publish_exit_code(EXIT_SUCCESS);
    if let Err(err) = kernel.install_termination_handler(TERMINATION_SIGNAL) {
        tracing::error!(%err, "init setup failed");
        kernel.terminate(err.exit_code());
    }

    tracing::debug!(%root, "init running");
    let code = Reaper::new(kernel, root).run();
    kernel.terminate(code)
}
