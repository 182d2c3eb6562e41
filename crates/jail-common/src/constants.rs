//! Exit codes, mount points, and other fixed values.

/// Exit code when no root command status was observed.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for every setup failure: spawn, mount chain, fork, exec, wait.
pub const EXIT_SETUP_FAILURE: i32 = 1;

/// Exit code reported when the root command did not exit normally.
///
/// Indistinguishable from a target that exits with 254 on its own.
pub const EXIT_ABNORMAL_TERMINATION: i32 = 254;

/// Mask applied to a normal exit code before it is reported.
pub const EXIT_CODE_MASK: i32 = 0xff;

/// Root of the mount tree whose propagation is made private.
pub const ROOT_MOUNT_POINT: &str = "/";

/// Mount point of the procfs instance replaced inside the jail.
pub const PROC_MOUNT_POINT: &str = "/proc";

/// Source name passed to `mount(2)` for procfs.
pub const PROCFS_SOURCE: &str = "proc";

/// Filesystem type passed to `mount(2)` for procfs.
pub const PROCFS_TYPE: &str = "proc";

/// Process label set on the init process (at most 15 bytes).
pub const INIT_PROCESS_NAME: &str = "jail-init";

/// Stack handed to the namespace child created by `clone(2)`.
pub const CHILD_STACK_SIZE: usize = 1024 * 1024;
