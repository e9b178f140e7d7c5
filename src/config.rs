//! Build configuration resolution.
//!
//! Raw CLI/CI input comes in as a [`BuildRequest`]; [`BuildConfig::resolve`]
//! validates the required directories, normalizes and creates the install
//! tree, and hands the driver an immutable view of everything it needs.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::util::fs::{ensure_dir, normalize_path};

/// Length the CI branch hash is truncated to when namespacing installs.
const BRANCH_HASH_LEN: usize = 7;

/// Raw, unvalidated build parameters as supplied on the command line or
/// translated from CI parameters.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub source_path: PathBuf,
    pub build_path: PathBuf,
    pub install_path: PathBuf,
    pub release_path: Option<PathBuf>,
    pub libs_path: PathBuf,
    pub sdk_path: PathBuf,

    /// CI branch hash; namespaces the install directory when present.
    pub branch_hash: Option<String>,

    /// C compiler override (`-DCMAKE_C_COMPILER`).
    pub cc: Option<String>,
    /// C++ compiler override (`-DCMAKE_CXX_COMPILER`).
    pub cxx: Option<String>,

    pub jobs: usize,
    pub build_type: String,
    pub project: String,
    pub version: String,

    pub clean: bool,
    pub dry_run: bool,
    pub export_only: bool,
    pub package: bool,

    /// AppSDK location and version, forwarded to CMake.
    pub appsdk_path: Option<PathBuf>,
    pub appsdk_version: Option<String>,
    /// Message-queue library root (`-DZMQ_ROOT`).
    pub zmq_root: Option<PathBuf>,
    /// Boost root; include/lib subdirectories are derived from it.
    pub boost_root: Option<PathBuf>,
}

/// Fully resolved build configuration, immutable once created.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    /// Install prefix, already namespaced by the truncated branch hash
    /// when one was supplied.
    pub install_dir: PathBuf,
    pub release_dir: Option<PathBuf>,
    pub libs_dir: PathBuf,
    pub sdk_dir: PathBuf,

    /// Truncated branch hash, empty outside CI.
    pub branch_hash: String,

    pub cc: Option<String>,
    pub cxx: Option<String>,

    pub jobs: usize,
    pub build_type: String,
    pub project: String,
    pub version: String,

    pub clean: bool,
    pub dry_run: bool,
    pub export_only: bool,
    pub package: bool,

    pub appsdk_path: Option<PathBuf>,
    pub appsdk_version: Option<String>,
    pub zmq_root: Option<PathBuf>,
    pub boost_root: Option<PathBuf>,
}

impl BuildConfig {
    /// Validate a request and derive the concrete directory layout.
    ///
    /// The source, libs and SDK directories must already exist; the
    /// install directory is created here so the driver can assume it.
    pub fn resolve(request: BuildRequest) -> Result<BuildConfig> {
        require_dir("source_path", &request.source_path)?;
        require_dir("libs_path", &request.libs_path)?;
        require_dir("sdk_path", &request.sdk_path)?;

        let branch_hash: String = request
            .branch_hash
            .unwrap_or_default()
            .chars()
            .take(BRANCH_HASH_LEN)
            .collect();

        let mut install_dir = normalize_path(&request.install_path);
        if !branch_hash.is_empty() {
            install_dir = install_dir.join(&branch_hash);
        }
        ensure_dir(&install_dir)?;
        let install_dir = normalize_path(&install_dir);

        // Packaging needs the release tree up front, but never in a
        // dry run.
        let release_dir = request.release_path.map(|p| normalize_path(&p));
        if request.package && !request.dry_run {
            if let Some(ref release) = release_dir {
                ensure_dir(release)?;
            }
        }

        Ok(BuildConfig {
            source_dir: normalize_path(&request.source_path),
            build_dir: normalize_path(&request.build_path),
            install_dir,
            release_dir,
            libs_dir: normalize_path(&request.libs_path),
            sdk_dir: normalize_path(&request.sdk_path),
            branch_hash,
            cc: request.cc,
            cxx: request.cxx,
            jobs: request.jobs,
            build_type: request.build_type,
            project: request.project,
            version: request.version,
            clean: request.clean,
            dry_run: request.dry_run,
            export_only: request.export_only,
            package: request.package,
            appsdk_path: request.appsdk_path,
            appsdk_version: request.appsdk_version,
            zmq_root: request.zmq_root,
            boost_root: request.boost_root,
        })
    }

    /// Artifact file name in the release tree, e.g.
    /// `renderserver-1.0.0-3f2a1bc-linux-x86_64.tar.bz2`.
    pub fn artifact_name(&self, os: &str, arch: &str) -> String {
        let mut name = format!("{}-{}", self.project, self.version);
        if !self.branch_hash.is_empty() {
            name.push('-');
            name.push_str(&self.branch_hash);
        }
        format!("{}-{}-{}.tar.bz2", name, os, arch)
    }
}

fn require_dir(arg: &'static str, path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::InvalidPath {
            arg,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
