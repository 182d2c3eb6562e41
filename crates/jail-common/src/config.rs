//! Runtime configuration for a single jail invocation.
//!
//! There is no configuration file: the defaults below are the jail's
//! behavior, and only the CLI's logging flags sit on top of them.

use std::path::PathBuf;

use crate::constants;

/// Knobs consumed by the bootstrap, init, and spawn stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JailConfig {
    /// Root of the mount tree made private inside the new namespace.
    pub root_mount: PathBuf,
    /// Location of the procfs instance that is detached and remounted.
    pub proc_mount: PathBuf,
    /// Whether the fresh procfs is mounted read-only.
    pub proc_read_only: bool,
    /// Label set on the init process via `prctl(PR_SET_NAME)`.
    pub init_name: String,
    /// Size of the stack allocated for the namespace child.
    pub stack_size: usize,
}

impl Default for JailConfig {
    fn default() -> Self {
        Self {
            root_mount: PathBuf::from(constants::ROOT_MOUNT_POINT),
            proc_mount: PathBuf::from(constants::PROC_MOUNT_POINT),
            proc_read_only: true,
            init_name: constants::INIT_PROCESS_NAME.to_owned(),
            stack_size: constants::CHILD_STACK_SIZE,
        }
    }
}
