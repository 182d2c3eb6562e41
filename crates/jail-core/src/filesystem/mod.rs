//! Filesystem setup for the jail's mount namespace.
//!
//! Makes mount propagation private and swaps the inherited `/proc` for one
//! scoped to the new PID namespace.

pub mod mount;
