//! Jail lifecycle for a single command.
//!
//! Process chain: the supervisor spawns a namespace child, the child
//! bootstraps its mounts and forks, the forking side becomes the init/reaper
//! of the new PID namespace and the forked side execs the target.
//! Everything here is generic over [`jail_core::kernel::Kernel`].

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod bootstrap;
pub mod child;
pub mod engine;
pub mod exec;
pub mod reaper;
pub mod status;
pub mod supervisor;

#[cfg(test)]
mod testing;
