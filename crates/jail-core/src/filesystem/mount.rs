//! Mount operations performed inside the jail's mount namespace.

use std::path::Path;

use jail_common::constants::{PROCFS_SOURCE, PROCFS_TYPE};
use jail_common::error::{JailError, Result};
use nix::mount::{MntFlags, MsFlags, mount, umount2};

/// Recursively marks every mount under `root` as private.
///
/// Hosts running systemd mount everything shared; without this, mounts made
/// inside the jail would propagate back to the host and vice versa.
///
/// # Errors
///
/// Returns [`JailError::Mount`] if `mount(2)` fails.
pub fn privatize_mount_tree(root: &Path) -> Result<()> {
    tracing::debug!(root = %root.display(), "making mount tree private");
    mount(
        None::<&str>,
        root,
        None::<&str>,
        MsFlags::MS_REC | MsFlags::MS_PRIVATE,
        None::<&str>,
    )
    .map_err(|e| JailError::Mount {
        operation: "private remount",
        target: root.to_path_buf(),
        source: e.into(),
    })
}

/// Lazily unmounts `target` with `MNT_DETACH`.
///
/// A lazy unmount succeeds even while processes still hold references into
/// the old mount.
///
/// # Errors
///
/// Returns [`JailError::Mount`] if `umount2(2)` fails.
pub fn detach_unmount(target: &Path) -> Result<()> {
    tracing::debug!(target = %target.display(), "detaching mount");
    umount2(target, MntFlags::MNT_DETACH).map_err(|e| JailError::Mount {
        operation: "detach unmount",
        target: target.to_path_buf(),
        source: e.into(),
    })
}

/// Mounts a fresh procfs at `target`.
///
/// Must run after the PID namespace exists: the new instance lists only
/// processes of the caller's PID namespace.
///
/// # Errors
///
/// Returns [`JailError::Mount`] if `mount(2)` fails.
pub fn mount_procfs(target: &Path, read_only: bool) -> Result<()> {
    let flags = if read_only {
        MsFlags::MS_RDONLY
    } else {
        MsFlags::empty()
    };
    tracing::debug!(target = %target.display(), read_only, "mounting procfs");
    mount(
        Some(PROCFS_SOURCE),
        target,
        Some(PROCFS_TYPE),
        flags,
        Some(""),
    )
    .map_err(|e| JailError::Mount {
        operation: "procfs mount",
        target: target.to_path_buf(),
        source: e.into(),
    })
}
