//! Shared utilities

pub mod fs;
pub mod process;

pub use process::{DryRunExecutor, Executor, ExternalCommand, ProcessExecutor};
