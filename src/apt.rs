// src/apt.rs

//! Elevated apt-get invocations and upgradable-package enumeration
//!
//! Removal and upgrade run as `sudo apt-get ... -y <name>` with inherited
//! stdio, so sudo can prompt for a password and apt progress stays
//! visible. Success is exit status zero; everything else is an error.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::process::Command;
use tracing::{debug, info};

/// Remove an installed package via apt-get
pub fn remove(name: &str) -> Result<()> {
    info!("Removing package: {}", name);
    run_elevated(&["remove", "-y", name])
}

/// Upgrade one package to its candidate version via apt-get
pub fn upgrade(name: &str) -> Result<()> {
    info!("Upgrading package: {}", name);
    run_elevated(&["install", "--only-upgrade", "-y", name])
}

fn run_elevated(args: &[&str]) -> Result<()> {
    let command = format!("sudo apt-get {}", args.join(" "));
    debug!("Running: {}", command);

    let status = Command::new("sudo")
        .arg("apt-get")
        .args(args)
        .status()
        .map_err(|e| Error::Command {
            command: command.clone(),
            reason: format!("failed to launch: {}. Is sudo installed?", e),
        })?;

    if !status.success() {
        return Err(Error::Command {
            command,
            reason: format!("exited with {}", status),
        });
    }

    Ok(())
}

/// List package names with a newer candidate version available
///
/// Runs `apt list --upgradable`. Callers treat failure as non-fatal; the
/// menu just loses its upgradable markers.
pub fn list_upgradable() -> Result<HashSet<String>> {
    debug!("Querying upgradable packages");

    let output = Command::new("apt")
        .args(["list", "--upgradable"])
        .output()
        .map_err(|e| Error::Query(format!("Failed to run apt: {}", e)))?;

    if !output.status.success() {
        return Err(Error::Query(format!(
            "apt list --upgradable failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    let upgradable = parse_upgradable(&String::from_utf8_lossy(&output.stdout));
    debug!("Found {} upgradable packages", upgradable.len());
    Ok(upgradable)
}

/// Parse `apt list --upgradable` output
///
/// Lines look like `vim/stable 2:9.0.1378-2 amd64 [upgradable from: ...]`;
/// the package name is everything before the first `/`. Header lines such
/// as `Listing...` have no `/` field and are skipped.
pub fn parse_upgradable(output: &str) -> HashSet<String> {
    output
        .lines()
        .filter_map(|line| {
            let (name, _rest) = line.split_once('/')?;
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upgradable_strips_suite_suffix() {
        let output = "\
Listing... Done
firefox/stable-security 128.0esr-1 amd64 [upgradable from: 127.0-1]
vim/stable 2:9.0.1378-2 amd64 [upgradable from: 2:9.0.1000-1]
";
        let upgradable = parse_upgradable(output);
        assert_eq!(upgradable.len(), 2);
        assert!(upgradable.contains("firefox"));
        assert!(upgradable.contains("vim"));
    }

    #[test]
    fn test_parse_upgradable_skips_header_and_blank_lines() {
        let upgradable = parse_upgradable("Listing... Done\n\n");
        assert!(upgradable.is_empty());
    }

    #[test]
    fn test_parse_upgradable_empty_output() {
        assert!(parse_upgradable("").is_empty());
    }
}
