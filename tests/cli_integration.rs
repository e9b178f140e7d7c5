//! CLI integration tests for Slipway.
//!
//! These tests verify argument validation, dry-run behavior, and the
//! fail-fast pipeline using stub tools instead of real CMake/Ninja.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the slipway binary command.
fn slipway() -> Command {
    Command::cargo_bin("slipway").unwrap()
}

/// Create a temporary directory for test builds.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Lay out source/libs/sdk directories and return the base build args.
fn base_args(tmp: &TempDir) -> Vec<String> {
    for dir in ["src", "libs", "sdk"] {
        fs::create_dir_all(tmp.path().join(dir)).unwrap();
    }

    vec![
        "build".to_string(),
        format!("--source-path={}", tmp.path().join("src").display()),
        format!("--build-path={}", tmp.path().join("build").display()),
        format!("--install-path={}", tmp.path().join("install").display()),
        format!("--libs-path={}", tmp.path().join("libs").display()),
        format!("--sdk-path={}", tmp.path().join("sdk").display()),
        "--jobs=4".to_string(),
    ]
}

/// Write an executable stub tool into `bin_dir`.
#[cfg(unix)]
fn write_stub_tool(bin_dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(bin_dir).unwrap();
    let path = bin_dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

// ============================================================================
// argument validation
// ============================================================================

#[test]
fn test_missing_source_path_names_the_argument() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args[1] = format!("--source-path={}", tmp.path().join("nope").display());

    slipway()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("source_path"))
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_missing_libs_path_names_the_argument() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args[4] = format!("--libs-path={}", tmp.path().join("missing-libs").display());

    slipway()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("libs_path"));
}

#[test]
fn test_missing_sdk_path_names_the_argument() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args[5] = format!("--sdk-path={}", tmp.path().join("missing-sdk").display());

    slipway()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sdk_path"));
}

// ============================================================================
// dry run
// ============================================================================

#[test]
fn test_dry_run_prints_tool_invocations() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args.push("--dry-run".to_string());
    args.push("--platform=linux".to_string());

    slipway()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Build information:"))
        .stdout(predicate::str::contains("cmake -G Ninja"))
        .stdout(predicate::str::contains("-DCMAKE_BUILD_TYPE=Release"))
        .stdout(predicate::str::contains("-DQT_ROOT="))
        .stdout(predicate::str::contains("ninja -j4 install"));
}

#[test]
fn test_dry_run_is_deterministic() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args.push("--dry-run".to_string());
    args.push("--platform=linux".to_string());

    let first = slipway().args(&args).output().unwrap();
    let second = slipway().args(&args).output().unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_dry_run_creates_install_dir_but_no_build_dir() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args.push("--dry-run".to_string());
    args.push("--platform=linux".to_string());

    slipway().args(&args).assert().success();

    // The resolver owns the install-dir precondition, even in a dry run.
    assert!(tmp.path().join("install").is_dir());
    assert!(!tmp.path().join("build").exists());
}

#[test]
fn test_branch_hash_namespaces_install_prefix() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args.push("--dry-run".to_string());
    args.push("--platform=linux".to_string());
    args.push("--branch-hash=3f2a1bc9d8e7".to_string());

    slipway()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("3f2a1bc"))
        .stdout(predicate::str::contains("3f2a1bc9").not());

    assert!(tmp.path().join("install").join("3f2a1bc").is_dir());
}

#[test]
fn test_windows_dry_run_uses_bundled_ninja() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args.push("--dry-run".to_string());
    args.push("--platform=windows".to_string());

    slipway()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("ninja.exe"))
        .stdout(predicate::str::contains("qt"));
}

// ============================================================================
// pipeline with stub tools
// ============================================================================

#[cfg(unix)]
#[test]
fn test_missing_cmake_is_reported_before_configuring() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    fs::create_dir_all(&bin).unwrap();

    let mut args = base_args(&tmp);
    args.push("--platform=linux".to_string());

    slipway()
        .args(&args)
        .env("PATH", &bin)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cmake not found"));

    // Discovery fails before the build directory is prepared.
    assert!(!tmp.path().join("build").exists());
}

#[cfg(unix)]
#[test]
fn test_missing_ninja_is_reported() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    write_stub_tool(&bin, "cmake", "exit 0");

    let mut args = base_args(&tmp);
    args.push("--platform=linux".to_string());

    slipway()
        .args(&args)
        .env("PATH", &bin)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ninja not found"));
}

#[cfg(unix)]
#[test]
fn test_windows_build_requires_bundled_ninja() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    write_stub_tool(&bin, "cmake", "exit 0");

    // No ninja.exe under <source>/build/tools.
    let mut args = base_args(&tmp);
    args.push("--platform=windows".to_string());

    slipway()
        .args(&args)
        .env("PATH", &bin)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ninja not found"));
}

#[cfg(unix)]
#[test]
fn test_configure_failure_aborts_before_build() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    write_stub_tool(&bin, "cmake", "exit 3");
    let marker = tmp.path().join("ninja-ran");
    write_stub_tool(&bin, "ninja", &format!(": > {}", marker.display()));

    let mut args = base_args(&tmp);
    args.push("--platform=linux".to_string());

    slipway()
        .args(&args)
        .env("PATH", &bin)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error during configuration"));

    assert!(!marker.exists(), "build step ran after configure failed");
}

#[cfg(unix)]
#[test]
fn test_build_failure_is_reported() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    write_stub_tool(&bin, "cmake", "exit 0");
    write_stub_tool(&bin, "ninja", "exit 2");

    let mut args = base_args(&tmp);
    args.push("--platform=linux".to_string());

    slipway()
        .args(&args)
        .env("PATH", &bin)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error during the compilation"));
}

#[cfg(unix)]
#[test]
fn test_clean_build_empties_stale_build_dir() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    write_stub_tool(&bin, "cmake", "exit 0");
    write_stub_tool(&bin, "ninja", "exit 0");

    let build_dir = tmp.path().join("build");
    fs::create_dir_all(build_dir.join("CMakeFiles")).unwrap();
    fs::write(build_dir.join("CMakeCache.txt"), "stale").unwrap();

    let mut args = base_args(&tmp);
    args.push("--platform=linux".to_string());
    args.push("--clean".to_string());

    slipway().args(&args).env("PATH", &bin).assert().success();

    assert!(build_dir.is_dir());
    assert!(!build_dir.join("CMakeCache.txt").exists());
    assert!(!build_dir.join("CMakeFiles").exists());
}

#[cfg(unix)]
#[test]
fn test_package_emits_teamcity_parameter() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    write_stub_tool(&bin, "cmake", "exit 0");
    write_stub_tool(&bin, "ninja", "exit 0");

    let mut args = base_args(&tmp);
    args.push("--platform=macos".to_string());
    args.push("--package".to_string());
    args.push(format!(
        "--release-path={}",
        tmp.path().join("release").display()
    ));

    slipway()
        .args(&args)
        .env("PATH", &bin)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "##teamcity[setParameter name='renderserver.artifact.path'",
        ))
        .stdout(predicate::str::contains(".tar.bz2"));
}

#[cfg(unix)]
#[test]
fn test_export_only_never_invokes_tools() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    let marker = tmp.path().join("cmake-ran");
    write_stub_tool(&bin, "cmake", &format!(": > {}", marker.display()));
    write_stub_tool(&bin, "ninja", "exit 0");

    let mut args = base_args(&tmp);
    args.push("--platform=linux".to_string());
    args.push("--export-only".to_string());

    slipway()
        .args(&args)
        .env("PATH", &bin)
        .assert()
        .success()
        .stdout(predicate::str::contains("Build information:"));

    assert!(!marker.exists());
}

// ============================================================================
// environment-backed arguments
// ============================================================================

#[test]
fn test_build_type_from_environment() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args.push("--dry-run".to_string());
    args.push("--platform=linux".to_string());

    slipway()
        .args(&args)
        .env("SLIPWAY_BUILD_TYPE", "Debug")
        .assert()
        .success()
        .stdout(predicate::str::contains("-DCMAKE_BUILD_TYPE=Debug"));
}

#[test]
fn test_sdk_roots_from_environment() {
    let tmp = temp_dir();
    let mut args = base_args(&tmp);
    args.push("--dry-run".to_string());
    args.push("--platform=linux".to_string());

    slipway()
        .args(&args)
        .env("SLIPWAY_ZMQ_ROOT", "/opt/zmq")
        .env("SLIPWAY_BOOST_ROOT", "/opt/boost")
        .assert()
        .success()
        .stdout(predicate::str::contains("-DZMQ_ROOT=/opt/zmq"))
        .stdout(predicate::str::contains("-DBoost_INCLUDE_DIR=/opt/boost/include"));
}

// ============================================================================
// other commands
// ============================================================================

#[test]
fn test_info_reports_host() {
    slipway()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("OS:"))
        .stdout(predicate::str::contains("Architecture:"));
}

#[test]
fn test_completions_bash() {
    slipway()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slipway"));
}
