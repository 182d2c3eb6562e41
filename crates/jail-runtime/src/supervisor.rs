//! Host-side process that creates the jail and waits for it.

use jail_common::config::JailConfig;
use jail_common::error::Result;
use jail_common::types::CommandSpec;
use jail_core::kernel::Kernel;
use jail_core::namespace::NamespaceConfig;

use crate::{child, status};

/// Spawns the namespace child for `command` and waits for it.
///
/// Returns the code the invocation should exit with: the init process
/// already encodes the root command's status in its own exit code, which
/// is mapped through the same rules here.
///
/// # Errors
///
/// Returns an error if the namespace child cannot be created or the wait
/// for it fails.
pub fn supervise<K: Kernel>(kernel: &K, config: &JailConfig, command: &CommandSpec) -> Result<i32> {
    tracing::info!(program = %command.program().to_string_lossy(), "starting jail");

    let child = kernel.spawn_isolated(
        NamespaceConfig::default(),
        config.stack_size,
        Box::new(|| -> isize { child::enter_namespace(kernel, config, command) }),
    )?;
    tracing::debug!(%child, "waiting for namespace child");

    let status = kernel.wait_for(child)?;
    let record = status::classify(status);
    tracing::info!(%child, %record, "namespace child exited");
    Ok(record.exit_code())
}
