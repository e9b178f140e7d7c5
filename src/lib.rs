//! Slipway - build orchestration for the renderserver product
//!
//! This crate resolves user/CI-supplied parameters into concrete CMake
//! and Ninja invocations: host probing, toolchain environment
//! computation, configuration resolution, and the linear
//! configure/build/package pipeline.

pub mod ci;
pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod platform;
pub mod toolchain;
pub mod util;

pub use config::{BuildConfig, BuildRequest};
pub use driver::BuildDriver;
pub use error::Error;
pub use host::HostInfo;
pub use platform::Platform;
pub use toolchain::ToolchainEnv;
pub use util::process::{DryRunExecutor, Executor, ExternalCommand, ProcessExecutor};
