//! First steps inside the new namespaces, before anything is forked.

use jail_common::config::JailConfig;
use jail_common::error::Result;
use jail_core::kernel::Kernel;

/// Isolates the mount namespace and replaces `/proc`.
///
/// Order matters:
/// 1. make the whole tree private so mounts stop propagating to the host,
/// 2. lazily detach the inherited procfs so it cannot be uncovered later,
/// 3. mount a read-only procfs scoped to the new PID namespace.
///
/// Stops at the first failure; nothing is rolled back.
///
/// # Errors
///
/// Returns the first failing mount operation.
pub fn prepare_namespace<K: Kernel>(kernel: &K, config: &JailConfig) -> Result<()> {
    kernel.privatize_mount_tree(&config.root_mount)?;
    kernel.detach_unmount(&config.proc_mount)?;
    kernel.mount_procfs(&config.proc_mount, config.proc_read_only)?;
    tracing::debug!(proc = %config.proc_mount.display(), "namespace bootstrap complete");
    Ok(())
}
