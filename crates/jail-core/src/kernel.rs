//! The OS capability surface used by the jail's orchestration.
//!
//! Every system call the supervisor, bootstrap, init, and exec stages make
//! goes through [`Kernel`]. [`LinuxKernel`] forwards to the real primitives
//! in this crate; tests substitute a scripted implementation.

use std::path::Path;

use jail_common::error::{JailError, Result};
use jail_common::types::CommandSpec;
use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use nix::unistd::{ForkResult, Pid};

use crate::filesystem::mount;
use crate::namespace::NamespaceConfig;
use crate::namespace::spawn::{self, ChildEntry};
use crate::{process, signal};

/// Operations the jail needs from the operating system.
pub trait Kernel {
    /// Runs `entry` in a new child process with the requested namespaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the child cannot be created.
    fn spawn_isolated(
        &self,
        namespaces: NamespaceConfig,
        stack_size: usize,
        entry: ChildEntry<'_>,
    ) -> Result<Pid>;

    /// Blocks until `pid` terminates.
    ///
    /// # Errors
    ///
    /// Returns an error if the wait call fails.
    fn wait_for(&self, pid: Pid) -> Result<WaitStatus>;

    /// Recursively makes the mount tree at `root` private.
    ///
    /// # Errors
    ///
    /// Returns an error if the remount fails.
    fn privatize_mount_tree(&self, root: &Path) -> Result<()>;

    /// Lazily detaches the mount at `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the unmount fails.
    fn detach_unmount(&self, target: &Path) -> Result<()>;

    /// Mounts a fresh procfs at `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mount fails.
    fn mount_procfs(&self, target: &Path, read_only: bool) -> Result<()>;

    /// Forks the calling process.
    ///
    /// # Errors
    ///
    /// Returns an error if the fork fails.
    fn fork(&self) -> Result<ForkResult>;

    /// Labels the calling process.
    ///
    /// # Errors
    ///
    /// Returns an error if the label cannot be set.
    fn set_process_name(&self, name: &str) -> Result<()>;

    /// Makes `signal` terminate the process with the published exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler cannot be installed.
    fn install_termination_handler(&self, signal: Signal) -> Result<()>;

    /// Publishes the exit code used if the termination signal arrives.
    fn publish_exit_code(&self, code: i32);

    /// Blocks until any child terminates; `None` once no children remain.
    ///
    /// # Errors
    ///
    /// Returns an error if the wait call fails for a reason other than
    /// having no children.
    fn reap_next_child(&self) -> Result<Option<WaitStatus>>;

    /// Replaces the process image; only returns on failure.
    fn replace_process_image(&self, command: &CommandSpec) -> JailError;

    /// Exits the calling process.
    fn terminate(&self, code: i32) -> !;
}

/// [`Kernel`] backed by real Linux system calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxKernel;

impl Kernel for LinuxKernel {
    fn spawn_isolated(
        &self,
        namespaces: NamespaceConfig,
        stack_size: usize,
        entry: ChildEntry<'_>,
    ) -> Result<Pid> {
        spawn::spawn_isolated(namespaces, stack_size, entry)
    }

    fn wait_for(&self, pid: Pid) -> Result<WaitStatus> {
        process::wait_for(pid)
    }

    fn privatize_mount_tree(&self, root: &Path) -> Result<()> {
        mount::privatize_mount_tree(root)
    }

    fn detach_unmount(&self, target: &Path) -> Result<()> {
        mount::detach_unmount(target)
    }

    fn mount_procfs(&self, target: &Path, read_only: bool) -> Result<()> {
        mount::mount_procfs(target, read_only)
    }

    fn fork(&self) -> Result<ForkResult> {
        process::fork_process()
    }

    fn set_process_name(&self, name: &str) -> Result<()> {
        process::set_process_name(name)
    }

    fn install_termination_handler(&self, signal: Signal) -> Result<()> {
        signal::install_termination_handler(signal)
    }

    fn publish_exit_code(&self, code: i32) {
        signal::publish_exit_code(code);
    }

    fn reap_next_child(&self) -> Result<Option<WaitStatus>> {
        process::reap_next_child()
    }

    fn replace_process_image(&self, command: &CommandSpec) -> JailError {
        process::replace_process_image(command)
    }

    fn terminate(&self, code: i32) -> ! {
        process::terminate(code)
    }
}
