//! Custom shell commands.
//!
//! Each module defines an operation enum exchanged with the Shell and a
//! typed, Command-based API used by the update functions.

pub mod storage;
pub mod timer;
