//! `slipway build` command

use anyhow::{anyhow, Result};

use crate::cli::BuildArgs;
use slipway::util::process::{DryRunExecutor, Executor, ProcessExecutor};
use slipway::{BuildConfig, BuildDriver, BuildRequest, HostInfo, Platform};

pub fn execute(args: BuildArgs) -> Result<()> {
    let host = HostInfo::probe();

    let platform = match args.platform {
        Some(p) => p,
        None => Platform::current()
            .ok_or_else(|| anyhow!("unsupported host platform: {}", host.os))?,
    };

    // Jobs: CLI > host parallelism
    let jobs = args.jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });

    let request = BuildRequest {
        source_path: args.source_path,
        build_path: args.build_path,
        install_path: args.install_path,
        release_path: args.release_path,
        libs_path: args.libs_path,
        sdk_path: args.sdk_path,
        branch_hash: args.branch_hash,
        cc: args.cc,
        cxx: args.cxx,
        jobs,
        build_type: args.build_type,
        project: args.project,
        version: args.project_version,
        clean: args.clean,
        dry_run: args.dry_run,
        export_only: args.export_only,
        package: args.package,
        appsdk_path: args.appsdk_path,
        appsdk_version: args.appsdk_version,
        zmq_root: args.zmq_root,
        boost_root: args.boost_root,
    };

    let config = BuildConfig::resolve(request)?;
    let driver = BuildDriver::new(&config, platform, &host);

    // Fail before touching the build directory if a tool is missing.
    if !config.dry_run && !config.export_only {
        driver.check_tools()?;
    }

    let mut executor: Box<dyn Executor> = if config.dry_run {
        Box::new(DryRunExecutor::new())
    } else {
        Box::new(ProcessExecutor)
    };

    driver.run(executor.as_mut())?;

    Ok(())
}
