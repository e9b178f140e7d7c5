//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use slipway::Platform;

/// Slipway - build orchestration for the renderserver product
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure and build the rendering server
    Build(BuildArgs),

    /// TeamCity entry point: translate CI parameters and re-invoke the builder
    Ci(CiArgs),

    /// Print information about the build host
    Info,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Source tree of the rendering server
    #[arg(long)]
    pub source_path: PathBuf,

    /// Out-of-source build directory
    #[arg(long)]
    pub build_path: PathBuf,

    /// Install prefix; created if absent
    #[arg(long)]
    pub install_path: PathBuf,

    /// Release tree for packaged artifacts
    #[arg(long)]
    pub release_path: Option<PathBuf>,

    /// Prebuilt third-party libraries root
    #[arg(long)]
    pub libs_path: PathBuf,

    /// SDK root bundling the pinned toolchain and Qt
    #[arg(long, env = "SLIPWAY_SDK_PATH")]
    pub sdk_path: PathBuf,

    /// CI branch hash; namespaces the install directory (truncated to 7 chars)
    #[arg(long)]
    pub branch_hash: Option<String>,

    /// C compiler override
    #[arg(long)]
    pub cc: Option<String>,

    /// C++ compiler override
    #[arg(long)]
    pub cxx: Option<String>,

    /// Number of parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// CMake build type
    #[arg(long, env = "SLIPWAY_BUILD_TYPE", default_value = "Release")]
    pub build_type: String,

    /// Product name used in artifact paths
    #[arg(long, default_value = "renderserver")]
    pub project: String,

    /// Product version used in artifact names
    #[arg(long, default_value = "1.0.0")]
    pub project_version: String,

    /// Remove the build directory before configuring
    #[arg(long)]
    pub clean: bool,

    /// Print the tool invocations instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Resolve configuration and print build info only; skip compile
    #[arg(long)]
    pub export_only: bool,

    /// Emit the CI artifact parameter after a successful build
    #[arg(long)]
    pub package: bool,

    /// Target platform (defaults to the host platform)
    #[arg(long)]
    pub platform: Option<Platform>,

    /// AppSDK location, forwarded to CMake
    #[arg(long, env = "SLIPWAY_APPSDK_PATH")]
    pub appsdk_path: Option<PathBuf>,

    /// AppSDK version, forwarded to CMake
    #[arg(long, env = "SLIPWAY_APPSDK_VERSION")]
    pub appsdk_version: Option<String>,

    /// ZeroMQ installation root
    #[arg(long, env = "SLIPWAY_ZMQ_ROOT")]
    pub zmq_root: Option<PathBuf>,

    /// Boost installation root
    #[arg(long, env = "SLIPWAY_BOOST_ROOT")]
    pub boost_root: Option<PathBuf>,
}

#[derive(Args)]
pub struct CiArgs {
    /// Branch hash supplied by TeamCity
    #[arg(long)]
    pub teamcity_branch_hash: String,

    /// Branch being built
    #[arg(long, default_value = "master")]
    pub teamcity_branch: String,

    /// Install path supplied by TeamCity
    #[arg(long)]
    pub teamcity_install_path: PathBuf,

    /// Release path supplied by TeamCity
    #[arg(long)]
    pub teamcity_release_path: PathBuf,

    /// Build path supplied by TeamCity
    #[arg(long)]
    pub teamcity_build_path: PathBuf,

    /// Source tree on the agent
    #[arg(long)]
    pub source_path: PathBuf,

    /// Prebuilt third-party libraries root on the agent
    #[arg(long)]
    pub libs_path: PathBuf,

    /// SDK root on the agent
    #[arg(long, env = "SLIPWAY_SDK_PATH")]
    pub sdk_path: PathBuf,

    /// Agent is driven by Jenkins; skip the legacy toolchain setup
    #[arg(long)]
    pub jenkins: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
