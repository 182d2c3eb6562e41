//! Entry point of the namespace child created by the supervisor.

use jail_common::config::JailConfig;
use jail_common::types::CommandSpec;
use jail_core::kernel::Kernel;
use nix::unistd::ForkResult;

use crate::{bootstrap, exec, reaper};

/// Bootstraps the namespace, then splits into init and root command.
///
/// The forking side becomes the init/reaper; the forked side execs
/// `command`. Any setup failure terminates with the setup-failure code.
pub fn enter_namespace<K: Kernel>(kernel: &K, config: &JailConfig, command: &CommandSpec) -> ! {
    if let Err(err) = bootstrap::prepare_namespace(kernel, config) {
        tracing::error!(%err, "namespace bootstrap failed");
        kernel.terminate(err.exit_code());
    }

    match kernel.fork() {
        Ok(ForkResult::Parent { child }) => reaper::run_init(kernel, config, child),
        Ok(ForkResult::Child) => exec::run_target(kernel, command),
        Err(err) => {
            tracing::error!(%err, "cannot fork root command");
            kernel.terminate(err.exit_code())
        }
    }
}
