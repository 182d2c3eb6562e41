//! Linux namespace management for the jail.
//!
//! Only two namespaces are ever created: mount and PID. Network, user,
//! IPC, UTS, and cgroup namespaces are shared with the host.

pub mod spawn;

use nix::sched::CloneFlags;

/// Which namespaces the jail's child process gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceConfig {
    /// Isolate the mount table.
    pub mount: bool,
    /// Isolate the process ID space.
    pub pid: bool,
}

impl NamespaceConfig {
    /// Translates the configuration into `clone(2)` flags.
    pub fn clone_flags(self) -> CloneFlags {
        let mut flags = CloneFlags::empty();
        if self.mount {
            flags |= CloneFlags::CLONE_NEWNS;
        }
        if self.pid {
            flags |= CloneFlags::CLONE_NEWPID;
        }
        flags
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            mount: true,
            pid: true,
        }
    }
}
