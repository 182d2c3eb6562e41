//! Namespace-creating process spawn via `clone(2)`.

use jail_common::error::{JailError, Result};
use nix::sched::clone;
use nix::sys::signal::Signal;
use nix::unistd::Pid;

use super::NamespaceConfig;

/// Entry point run by the namespace child; its return value is the child's exit code.
pub type ChildEntry<'a> = Box<dyn FnMut() -> isize + 'a>;

/// Spawns a child process in fresh namespaces and returns its host PID.
///
/// The child runs `entry` on its own stack of `stack_size` bytes and
/// delivers `SIGCHLD` to the caller on exit. Inside the new PID namespace
/// the child is PID 1.
///
/// # Errors
///
/// Returns [`JailError::Spawn`] if `clone(2)` fails, typically `EPERM`
/// when the caller lacks `CAP_SYS_ADMIN`.
pub fn spawn_isolated(
    namespaces: NamespaceConfig,
    stack_size: usize,
    entry: ChildEntry<'_>,
) -> Result<Pid> {
    let flags = namespaces.clone_flags();
    tracing::debug!(?flags, stack_size, "cloning namespace child");

    let mut stack = vec![0_u8; stack_size];

    // SAFETY: the child gets a copy of this address space (no CLONE_VM), so
    // `stack` and everything `entry` borrows stay valid for the child. The
    // process is single-threaded at this point.
    let pid = unsafe { clone(entry, &mut stack, flags, Some(Signal::SIGCHLD as i32)) }
        .map_err(|e| JailError::Spawn { source: e.into() })?;

    tracing::debug!(%pid, "namespace child created");
    Ok(pid)
}
