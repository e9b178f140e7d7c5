//! CI invocation wrapper.
//!
//! TeamCity hands the build agent its own parameter names; this module
//! translates them into the `build` subcommand's arguments and re-invokes
//! the builder as a fresh subprocess, propagating its exit code verbatim.
//!
//! Some Windows agents predate the SDK-bundled toolchain and still rely
//! on a system-installed Visual Studio 2013; for those, a fixed legacy
//! variable set is attached to the child command (not the process
//! environment). Agents driven through the separate Jenkins mode skip it.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::platform::Platform;
use crate::util::process::{Executor, ExternalCommand};

/// Compiler pinned on the Unix CI fleet.
const CI_UNIX_CC: &str = "gcc-4.9.3";
const CI_UNIX_CXX: &str = "g++-4.9.3";

const LEGACY_VS2013_PATH: &[&str] = &[
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\Common7\IDE\CommonExtensions\Microsoft\TestWindow",
    r"C:\Program Files (x86)\MSBuild\12.0\bin\amd64",
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\VC\BIN\amd64",
    r"C:\Windows\Microsoft.NET\Framework64\v4.0.30319",
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\VC\VCPackages",
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\Common7\IDE",
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\Common7\Tools",
    r"C:\Program Files (x86)\Windows Kits\8.1\bin\x64",
    r"C:\Program Files (x86)\Windows Kits\8.1\bin\x86",
    r"C:\Windows\system32",
    r"C:\Windows",
    r"C:\Windows\System32\Wbem",
    r"C:\Windows\System32\WindowsPowerShell\v1.0",
];

const LEGACY_VS2013_INCLUDE: &[&str] = &[
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\VC\INCLUDE",
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\VC\ATLMFC\INCLUDE",
    r"C:\Program Files (x86)\Windows Kits\8.1\include\shared",
    r"C:\Program Files (x86)\Windows Kits\8.1\include\um",
    r"C:\Program Files (x86)\Windows Kits\8.1\include\winrt",
];

const LEGACY_VS2013_LIB: &[&str] = &[
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\VC\LIB\amd64",
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\VC\ATLMFC\LIB\amd64",
    r"C:\Program Files (x86)\Windows Kits\8.1\lib\winv6.3\um\x64",
];

const LEGACY_VS2013_LIBPATH: &[&str] = &[
    r"C:\Windows\Microsoft.NET\Framework64\v4.0.30319",
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\VC\LIB\amd64",
    r"C:\Program Files (x86)\Microsoft Visual Studio 12.0\VC\ATLMFC\LIB\amd64",
    r"C:\Program Files (x86)\Windows Kits\8.1\References\CommonConfiguration\Neutral",
];

/// CI-supplied parameters, as TeamCity names them.
#[derive(Debug, Clone)]
pub struct CiRequest {
    pub branch_hash: String,
    pub branch: String,
    pub install_path: PathBuf,
    pub release_path: PathBuf,
    pub source_path: PathBuf,
    pub build_path: PathBuf,
    pub libs_path: PathBuf,
    pub sdk_path: PathBuf,
    /// Delegate toolchain setup to the Jenkins agent mode.
    pub jenkins: bool,
}

/// The legacy VS2013 variable set, with the existing search path kept at
/// the end of PATH.
pub fn legacy_windows_env(base_path: Option<String>) -> Vec<(String, String)> {
    let mut path: Vec<String> = Vec::new();
    if let Some(base) = base_path {
        path.push(base);
    }
    path.extend(LEGACY_VS2013_PATH.iter().map(|s| s.to_string()));

    vec![
        ("PATH".to_string(), path.join(";")),
        ("INCLUDE".to_string(), LEGACY_VS2013_INCLUDE.join(";")),
        ("LIB".to_string(), LEGACY_VS2013_LIB.join(";")),
        ("LIBPATH".to_string(), LEGACY_VS2013_LIBPATH.join(";")),
    ]
}

/// Translate CI parameters into a `build` invocation of the given
/// builder executable.
pub fn child_command(request: &CiRequest, platform: Platform, builder_exe: &Path) -> ExternalCommand {
    let mut cmd = ExternalCommand::new(builder_exe)
        .arg("build")
        .arg(format!("--branch-hash={}", request.branch_hash))
        .arg(format!("--source-path={}", request.source_path.display()))
        .arg(format!("--build-path={}", request.build_path.display()))
        .arg(format!("--install-path={}", request.install_path.display()))
        .arg(format!("--release-path={}", request.release_path.display()))
        .arg(format!("--libs-path={}", request.libs_path.display()))
        .arg(format!("--sdk-path={}", request.sdk_path.display()))
        .arg("--package");

    match platform {
        Platform::Windows => {
            if !request.jenkins {
                cmd = cmd.envs(legacy_windows_env(std::env::var("PATH").ok()));
            }
        }
        _ => {
            cmd = cmd
                .arg(format!("--cc={}", CI_UNIX_CC))
                .arg(format!("--cxx={}", CI_UNIX_CXX));
        }
    }

    cmd
}

/// Re-invoke the builder with translated parameters and hand back the
/// child's exit code.
pub fn run(request: &CiRequest, platform: Platform, executor: &mut dyn Executor) -> Result<i32> {
    let exe = std::env::current_exe()
        .map_err(|e| crate::error::Error::io("failed to locate the builder executable", e))?;

    let cmd = child_command(request, platform, &exe);
    tracing::info!(
        "re-invoking builder for branch {} ({})",
        request.branch,
        request.branch_hash
    );

    let code = executor.run(&cmd)?;
    Ok(code.unwrap_or(-1))
}
