//! Classification of wait statuses into exit status records.

use jail_common::types::ExitStatusRecord;
use nix::sys::wait::WaitStatus;

/// Classifies a terminated child's wait status.
///
/// Anything other than a normal exit or a fatal signal counts as abnormal.
pub fn classify(status: WaitStatus) -> ExitStatusRecord {
    match status {
        WaitStatus::Exited(_, code) => ExitStatusRecord::Exited(code),
        WaitStatus::Signaled(_, signal, _) => ExitStatusRecord::Signaled(signal as i32),
        _ => ExitStatusRecord::Abnormal,
    }
}
