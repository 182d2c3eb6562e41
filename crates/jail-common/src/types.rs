//! Domain primitive types used across the jail workspace.

use std::ffi::{CStr, CString, OsString};
use std::fmt;
use std::os::unix::ffi::OsStringExt;

use crate::constants::{EXIT_ABNORMAL_TERMINATION, EXIT_CODE_MASK, EXIT_SUCCESS};
use crate::error::{JailError, Result};

/// The command run inside the jail: program path, arguments, environment.
///
/// Built once from the invocation and never modified afterwards. The
/// argument vector starts with the program itself; the environment is a
/// list of `NAME=value` entries in the form `execve(2)` expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<CString>,
    env: Vec<CString>,
}

impl CommandSpec {
    /// Creates a spec from an argument vector and the inherited environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `argv` is empty or any entry contains a NUL byte.
    pub fn new<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self::with_env(argv, std::env::vars_os())
    }

    /// Creates a spec from an argument vector and an explicit environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `argv` is empty or any entry contains a NUL byte.
    pub fn with_env<I, S, E, K, V>(argv: I, env: E) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
        E: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let argv = argv
            .into_iter()
            .map(|arg| to_cstring(arg.into().into_vec()))
            .collect::<Result<Vec<_>>>()?;
        if argv.is_empty() {
            return Err(JailError::InvalidCommand {
                message: "no program given".into(),
            });
        }

        let env = env
            .into_iter()
            .map(|(name, value)| {
                let mut entry = name.into().into_vec();
                entry.push(b'=');
                entry.extend(value.into().into_vec());
                to_cstring(entry)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { argv, env })
    }

    /// Returns the program path (`argv[0]` of the target).
    pub fn program(&self) -> &CStr {
        &self.argv[0]
    }

    /// Returns the full argument vector, program first.
    pub fn argv(&self) -> &[CString] {
        &self.argv
    }

    /// Returns the environment as `NAME=value` entries.
    pub fn env(&self) -> &[CString] {
        &self.env
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

fn to_cstring(bytes: Vec<u8>) -> Result<CString> {
    CString::new(bytes).map_err(|e| JailError::InvalidCommand {
        message: format!("argument contains a NUL byte at offset {}", e.nul_position()),
    })
}

/// Termination status of the root command, as last observed by the reaper.
///
/// Starts as [`ExitStatusRecord::NoneObserved`], which reports success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitStatusRecord {
    /// The root command has not been reaped yet.
    #[default]
    NoneObserved,
    /// The root command exited normally with this code.
    Exited(i32),
    /// The root command was terminated by this signal number.
    Signaled(i32),
    /// The root command ended in some other non-normal way.
    Abnormal,
}

impl ExitStatusRecord {
    /// Maps the record to the process exit code reported by the jail.
    ///
    /// A normal exit keeps its code modulo 256; any abnormal end maps to
    /// [`EXIT_ABNORMAL_TERMINATION`].
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::NoneObserved => EXIT_SUCCESS,
            Self::Exited(code) => code & EXIT_CODE_MASK,
            Self::Signaled(_) | Self::Abnormal => EXIT_ABNORMAL_TERMINATION,
        }
    }

    /// Returns `true` once a status has been recorded.
    pub const fn is_observed(self) -> bool {
        !matches!(self, Self::NoneObserved)
    }
}

impl fmt::Display for ExitStatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoneObserved => write!(f, "none observed"),
            Self::Exited(code) => write!(f, "exited with {code}"),
            Self::Signaled(signo) => write!(f, "killed by signal {signo}"),
            Self::Abnormal => write!(f, "terminated abnormally"),
        }
    }
}
