//! Termination handling for the init process.
//!
//! The reaper publishes the exit code it would report right now; when the
//! termination signal arrives the handler exits with that code immediately.
//! The reap loop is the only writer.

use std::sync::atomic::{AtomicI32, Ordering};

use jail_common::constants::EXIT_SUCCESS;
use jail_common::error::{JailError, Result};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

static PUBLISHED_EXIT_CODE: AtomicI32 = AtomicI32::new(EXIT_SUCCESS);

/// Stores the exit code the termination handler will use.
pub fn publish_exit_code(code: i32) {
    PUBLISHED_EXIT_CODE.store(code, Ordering::SeqCst);
}

/// Returns the currently published exit code.
pub fn published_exit_code() -> i32 {
    PUBLISHED_EXIT_CODE.load(Ordering::SeqCst)
}

extern "C" fn exit_with_published_code(_signal: libc::c_int) {
    // SAFETY: an atomic load and `_exit` are both async-signal-safe.
    unsafe { libc::_exit(PUBLISHED_EXIT_CODE.load(Ordering::SeqCst)) }
}

/// Installs a handler that exits with the published code on `signal`.
///
/// Descendants are not signaled; they are left to the kernel, which kills
/// the rest of the PID namespace once its init exits.
///
/// # Errors
///
/// Returns [`JailError::Signal`] if `sigaction(2)` fails.
pub fn install_termination_handler(signal: Signal) -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(exit_with_published_code),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler only touches an atomic and calls `_exit`.
    let _previous = unsafe { sigaction(signal, &action) }.map_err(|e| JailError::Signal {
        signal: signal.to_string(),
        source: e.into(),
    })?;
    tracing::debug!(%signal, "termination handler installed");
    Ok(())
}
