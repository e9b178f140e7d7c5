//! Error taxonomy for the build pipeline.
//!
//! Every error here is terminal: the pipeline is strictly fail-fast and
//! there is no retry or partial-success state. The binary reports the
//! error on stderr and exits non-zero.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while resolving configuration or driving the build.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// A required directory argument does not point at an existing directory.
    #[error("invalid `{arg}`: {} does not exist", path.display())]
    #[diagnostic(
        code(slipway::config::invalid_path),
        help("pass an existing directory for `{arg}`")
    )]
    InvalidPath { arg: &'static str, path: PathBuf },

    /// The SDK root handed to the toolchain configurator is missing.
    #[error("SDK root not found: {}", path.display())]
    #[diagnostic(
        code(slipway::toolchain::sdk_not_found),
        help("check the `--sdk-path` argument or the SLIPWAY_SDK_PATH variable")
    )]
    SdkRootNotFound { path: PathBuf },

    /// The configuration tool (cmake) exited non-zero.
    #[error("there was an error during configuration (exit code {code:?})")]
    #[diagnostic(code(slipway::driver::configure_failed))]
    ConfigureFailed { code: Option<i32> },

    /// The build tool (ninja) exited non-zero.
    #[error("there was an error during the compilation (exit code {code:?})")]
    #[diagnostic(code(slipway::driver::build_failed))]
    BuildFailed { code: Option<i32> },

    /// A required external tool is not installed.
    #[error("{tool} not found")]
    #[diagnostic(
        code(slipway::driver::tool_not_found),
        help("install {tool} and ensure it's in your PATH")
    )]
    ToolNotFound { tool: &'static str },

    /// An external tool could not be started at all.
    #[error("failed to spawn `{program}`")]
    #[diagnostic(
        code(slipway::driver::spawn),
        help("is the tool installed and on PATH?")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    #[diagnostic(code(slipway::io))]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with a human-readable context line.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
