//! Scripted [`Kernel`] for unit tests.
//!
//! Records every call, replays queued reap results, and fails the operation
//! named by [`FakeKernel::failing`]. `terminate` unwinds with
//! [`Terminated`] so tests can observe diverging paths.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use jail_common::error::{JailError, Result};
use jail_common::types::CommandSpec;
use jail_core::kernel::Kernel;
use jail_core::namespace::NamespaceConfig;
use jail_core::namespace::spawn::ChildEntry;
use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use nix::unistd::{ForkResult, Pid};

/// Host PID handed out for the namespace child.
pub const NAMESPACE_CHILD: Pid = Pid::from_raw(4242);

/// PID handed out for the forked root command.
pub const ROOT_COMMAND: Pid = Pid::from_raw(2);

/// Panic payload carrying the code passed to `terminate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminated(pub i32);

/// One recorded kernel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SpawnIsolated(NamespaceConfig),
    WaitFor(Pid),
    PrivatizeMountTree(PathBuf),
    DetachUnmount(PathBuf),
    MountProcfs(PathBuf, bool),
    Fork,
    SetProcessName(String),
    InstallTerminationHandler(Signal),
    PublishExitCode(i32),
    ReapNextChild,
    ReplaceProcessImage(String),
    Terminate(i32),
}

/// Which side of a fork the fake reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkSide {
    Parent,
    Child,
}

pub struct FakeKernel {
    calls: RefCell<Vec<Call>>,
    reaps: RefCell<VecDeque<Result<Option<WaitStatus>>>>,
    failing: Option<&'static str>,
    fork_side: ForkSide,
    run_child: bool,
    child_exit: Cell<Option<i32>>,
    published: Cell<i32>,
}

impl FakeKernel {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            reaps: RefCell::new(VecDeque::new()),
            failing: None,
            fork_side: ForkSide::Parent,
            run_child: false,
            child_exit: Cell::new(None),
            published: Cell::new(0),
        }
    }

    /// Makes the named operation fail with `EPERM`.
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing = Some(operation);
        self
    }

    pub fn fork_side(mut self, side: ForkSide) -> Self {
        self.fork_side = side;
        self
    }

    /// Runs the namespace child entry inline during `spawn_isolated`.
    pub fn running_child(mut self) -> Self {
        self.run_child = true;
        self
    }

    /// Queues a status for the next `reap_next_child` call.
    pub fn reaps(self, status: WaitStatus) -> Self {
        self.reaps.borrow_mut().push_back(Ok(Some(status)));
        self
    }

    /// Queues a wait failure for the next `reap_next_child` call.
    pub fn reap_fails(self) -> Self {
        self.reaps.borrow_mut().push_back(Err(JailError::Wait {
            pid: -1,
            source: io::Error::from_raw_os_error(nix::errno::Errno::EIO as i32),
        }));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn published(&self) -> i32 {
        self.published.get()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn fails(&self, operation: &str) -> bool {
        self.failing == Some(operation)
    }
}

fn eperm() -> io::Error {
    io::Error::from_raw_os_error(nix::errno::Errno::EPERM as i32)
}

/// Runs `f`, which must end in `terminate`, and returns the exit code.
pub fn expect_termination(f: impl FnOnce()) -> i32 {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => panic!("expected the process to terminate"),
        Err(payload) => match payload.downcast::<Terminated>() {
            Ok(terminated) => terminated.0,
            Err(other) => panic::resume_unwind(other),
        },
    }
}

impl Kernel for FakeKernel {
    fn spawn_isolated(
        &self,
        namespaces: NamespaceConfig,
        _stack_size: usize,
        mut entry: ChildEntry<'_>,
    ) -> Result<Pid> {
        self.record(Call::SpawnIsolated(namespaces));
        if self.fails("spawn_isolated") {
            return Err(JailError::Spawn { source: eperm() });
        }
        if self.run_child {
            let code = match panic::catch_unwind(AssertUnwindSafe(|| entry())) {
                Ok(code) => i32::try_from(code).unwrap_or(i32::MAX),
                Err(payload) => match payload.downcast::<Terminated>() {
                    Ok(terminated) => terminated.0,
                    Err(other) => panic::resume_unwind(other),
                },
            };
            self.child_exit.set(Some(code));
        }
        Ok(NAMESPACE_CHILD)
    }

    fn wait_for(&self, pid: Pid) -> Result<WaitStatus> {
        self.record(Call::WaitFor(pid));
        if self.fails("wait_for") {
            return Err(JailError::Wait {
                pid: pid.as_raw(),
                source: io::Error::from_raw_os_error(nix::errno::Errno::ECHILD as i32),
            });
        }
        Ok(WaitStatus::Exited(pid, self.child_exit.get().unwrap_or(0)))
    }

    fn privatize_mount_tree(&self, root: &Path) -> Result<()> {
        self.record(Call::PrivatizeMountTree(root.to_path_buf()));
        if self.fails("privatize_mount_tree") {
            return Err(JailError::Mount {
                operation: "private remount",
                target: root.to_path_buf(),
                source: eperm(),
            });
        }
        Ok(())
    }

    fn detach_unmount(&self, target: &Path) -> Result<()> {
        self.record(Call::DetachUnmount(target.to_path_buf()));
        if self.fails("detach_unmount") {
            return Err(JailError::Mount {
                operation: "detach unmount",
                target: target.to_path_buf(),
                source: eperm(),
            });
        }
        Ok(())
    }

    fn mount_procfs(&self, target: &Path, read_only: bool) -> Result<()> {
        self.record(Call::MountProcfs(target.to_path_buf(), read_only));
        if self.fails("mount_procfs") {
            return Err(JailError::Mount {
                operation: "procfs mount",
                target: target.to_path_buf(),
                source: eperm(),
            });
        }
        Ok(())
    }

    fn fork(&self) -> Result<ForkResult> {
        self.record(Call::Fork);
        if self.fails("fork") {
            return Err(JailError::Fork {
                source: io::Error::from_raw_os_error(nix::errno::Errno::EAGAIN as i32),
            });
        }
        Ok(match self.fork_side {
            ForkSide::Parent => ForkResult::Parent {
                child: ROOT_COMMAND,
            },
            ForkSide::Child => ForkResult::Child,
        })
    }

    fn set_process_name(&self, name: &str) -> Result<()> {
        self.record(Call::SetProcessName(name.to_owned()));
        if self.fails("set_process_name") {
            return Err(JailError::ProcessName {
                name: name.to_owned(),
                source: eperm(),
            });
        }
        Ok(())
    }

    fn install_termination_handler(&self, signal: Signal) -> Result<()> {
        self.record(Call::InstallTerminationHandler(signal));
        if self.fails("install_termination_handler") {
            return Err(JailError::Signal {
                signal: signal.to_string(),
                source: eperm(),
            });
        }
        Ok(())
    }

    fn publish_exit_code(&self, code: i32) {
        self.record(Call::PublishExitCode(code));
        self.published.set(code);
    }

    fn reap_next_child(&self) -> Result<Option<WaitStatus>> {
        self.record(Call::ReapNextChild);
        self.reaps.borrow_mut().pop_front().unwrap_or(Ok(None))
    }

    fn replace_process_image(&self, command: &CommandSpec) -> JailError {
        self.record(Call::ReplaceProcessImage(command.to_string()));
        JailError::Exec {
            program: command.program().to_string_lossy().into_owned(),
            source: io::Error::from_raw_os_error(nix::errno::Errno::ENOENT as i32),
        }
    }

    fn terminate(&self, code: i32) -> ! {
        self.record(Call::Terminate(code));
        panic::panic_any(Terminated(code))
    }
}
