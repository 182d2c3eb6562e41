//! The root command process: replaces itself with the target.

use jail_common::types::CommandSpec;
use jail_core::kernel::Kernel;

/// Execs `command` with its inherited environment.
///
/// On success the process image is replaced. On failure the error is
/// reported and the process exits with the setup-failure code.
pub fn run_target<K: Kernel>(kernel: &K, command: &CommandSpec) -> ! {
    let err = kernel.replace_process_image(command);
    tracing::error!(%err, "cannot start root command");
    kernel.terminate(err.exit_code())
}
