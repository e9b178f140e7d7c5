//! `slipway ci` command

use anyhow::{anyhow, Result};

use crate::cli::CiArgs;
use slipway::ci::{self, CiRequest};
use slipway::util::process::ProcessExecutor;
use slipway::Platform;

pub fn execute(args: CiArgs) -> Result<()> {
    let platform =
        Platform::current().ok_or_else(|| anyhow!("unsupported host platform"))?;

    let request = CiRequest {
        branch_hash: args.teamcity_branch_hash,
        branch: args.teamcity_branch,
        install_path: args.teamcity_install_path,
        release_path: args.teamcity_release_path,
        build_path: args.teamcity_build_path,
        source_path: args.source_path,
        libs_path: args.libs_path,
        sdk_path: args.sdk_path,
        jenkins: args.jenkins,
    };

    let mut executor = ProcessExecutor;
    let code = ci::run(&request, platform, &mut executor)?;

    // The child's exit code is the build result; pass it through verbatim.
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
