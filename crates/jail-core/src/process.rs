//! Process primitives: fork, labels, waiting, reaping, exec, and exit.

use std::ffi::CString;

use jail_common::error::{JailError, Result};
use jail_common::types::CommandSpec;
use nix::errno::Errno;
use nix::sys::prctl;
use nix::sys::wait::{WaitPidFlag, WaitStatus, wait, waitpid};
use nix::unistd::{ForkResult, Pid, execve, fork};

/// Forks the calling process.
///
/// # Errors
///
/// Returns [`JailError::Fork`] if `fork(2)` fails.
pub fn fork_process() -> Result<ForkResult> {
    // SAFETY: the jail never starts threads, so the child inherits a
    // consistent copy of every lock and allocator state.
    let result = unsafe { fork() }.map_err(|e| JailError::Fork { source: e.into() })?;
    if let ForkResult::Parent { child } = result {
        tracing::debug!(%child, "forked root command process");
    }
    Ok(result)
}

/// Sets the calling process's name as shown in `/proc/<pid>/comm`.
///
/// # Errors
///
/// Returns [`JailError::ProcessName`] if the name holds a NUL byte or
/// `prctl(PR_SET_NAME)` fails.
pub fn set_process_name(name: &str) -> Result<()> {
    let label = CString::new(name).map_err(|e| JailError::ProcessName {
        name: name.to_owned(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
    })?;
    prctl::set_name(&label).map_err(|e| JailError::ProcessName {
        name: name.to_owned(),
        source: e.into(),
    })
}

/// Waits for `pid` to terminate, including children that switched thread
/// group or namespace identity (`__WALL`).
///
/// # Errors
///
/// Returns [`JailError::Wait`] if `waitpid(2)` fails, e.g. with `ECHILD`.
pub fn wait_for(pid: Pid) -> Result<WaitStatus> {
    tracing::debug!(%pid, "waiting for namespace child");
    waitpid(pid, Some(WaitPidFlag::__WALL)).map_err(|e| JailError::Wait {
        pid: pid.as_raw(),
        source: e.into(),
    })
}

/// Blocks until any child terminates and returns its status.
///
/// Returns `Ok(None)` once the caller has no children left. An interrupted
/// wait is restarted.
///
/// # Errors
///
/// Returns [`JailError::Wait`] for any failure other than `ECHILD`.
pub fn reap_next_child() -> Result<Option<WaitStatus>> {
    loop {
        match wait() {
            Ok(status) => return Ok(Some(status)),
            Err(Errno::ECHILD) => return Ok(None),
            Err(Errno::EINTR) => {}
            Err(e) => {
                return Err(JailError::Wait {
                    pid: -1,
                    source: e.into(),
                });
            }
        }
    }
}

/// Replaces the process image with `command`.
///
/// Only returns on failure, with the error describing why `execve(2)`
/// was refused. The program path is used as-is; there is no `PATH` lookup.
pub fn replace_process_image(command: &CommandSpec) -> JailError {
    tracing::debug!(%command, "replacing process image");
    match execve(command.program(), command.argv(), command.env()) {
        Ok(never) => match never {},
        Err(e) => JailError::Exec {
            program: command.program().to_string_lossy().into_owned(),
            source: e.into(),
        },
    }
}

/// Exits the calling process with `code`.
pub fn terminate(code: i32) -> ! {
    tracing::debug!(code, "terminating");
    std::process::exit(code)
}
