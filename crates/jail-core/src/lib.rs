//! # jail-core
//!
//! Low-level Linux primitives for the jail.
//!
//! This crate provides safe wrappers over:
//! - **Namespaces**: spawning a child in fresh mount + PID namespaces via `clone(2)`.
//! - **Filesystem**: privatizing mount propagation and replacing `/proc`.
//! - **Processes**: fork, process labels, waiting, reaping, and exec.
//! - **Signals**: the init process's termination handler.
//!
//! The [`kernel::Kernel`] trait bundles these into one capability surface so
//! the orchestration in `jail-runtime` can run against a fake in tests.
//!
//! All unsafe system calls are encapsulated in safe wrappers with
//! `// SAFETY:` documentation.

#![allow(unsafe_code)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

#[cfg(not(target_os = "linux"))]
compile_error!("jail-core requires Linux mount and PID namespaces");

pub mod filesystem;
pub mod kernel;
pub mod namespace;
pub mod process;
pub mod signal;
