// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=CAMERA_TELEMETRY_VERSION");

    // Packagers can pin the version string
    let version = std::env::var("CAMERA_TELEMETRY_VERSION").unwrap_or_else(|_| describe_version());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version from `git describe`, falling back to the crate version plus commit
fn describe_version() -> String {
    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    let described = git(&["describe", "--tags", "--always", "--match", "v*"]);
    let commit = git(&["rev-parse", "--short", "HEAD"]);

    match (described, commit) {
        // "v0.1.0-5-gabcdef1" -> "0.1.0-dirty-abcdef1"
        (Some(d), _) if d.starts_with('v') && d.contains('-') => {
            let d = d.trim_start_matches('v');
            let parts: Vec<&str> = d.rsplitn(3, '-').collect();
            if parts.len() >= 3 {
                let hash = parts[0].strip_prefix('g').unwrap_or(parts[0]);
                format!("{}-dirty-{}", parts[2], hash)
            } else {
                d.to_string()
            }
        }
        (Some(d), Some(hash)) if d.starts_with('v') => {
            format!("{}-{}", d.trim_start_matches('v'), hash)
        }
        (_, Some(hash)) => format!("{}-{}", pkg_version, hash),
        (_, None) => pkg_version,
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}
