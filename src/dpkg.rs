// src/dpkg.rs

//! Query installed packages from the local dpkg database
//!
//! This module wraps the `dpkg` and `dpkg-query` command-line tools.
//! All dependency and conflict semantics stay with dpkg itself; we only
//! parse its line-oriented output.

use crate::error::{Error, Result};
use std::process::Command;
use tracing::debug;

/// Basic information about one installed package
#[derive(Debug, Clone)]
pub struct PackageDetails {
    pub name: String,
    pub version: String,
    pub arch: String,
    pub description: Option<String>,
}

/// List all fully installed package names, in dpkg output order
pub fn list_installed() -> Result<Vec<String>> {
    debug!("Querying installed dpkg packages");

    let output = Command::new("dpkg")
        .args(["--get-selections"])
        .output()
        .map_err(|e| Error::Query(format!("Failed to run dpkg: {}. Is dpkg installed?", e)))?;

    if !output.status.success() {
        return Err(Error::Query(format!(
            "dpkg --get-selections failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    let packages = parse_selections(&String::from_utf8_lossy(&output.stdout));
    debug!("Found {} installed packages", packages.len());
    Ok(packages)
}

/// Parse `dpkg --get-selections` output
///
/// Each line is `name<whitespace>status`; only entries whose status token
/// is exactly `install` count as installed (`deinstall`, `purge` and
/// `hold` entries are skipped). Order is preserved.
pub fn parse_selections(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let name = fields.next()?;
            let status = fields.next()?;
            (status == "install").then(|| name.to_string())
        })
        .collect()
}

/// Query version and description for one installed package
pub fn query_package(name: &str) -> Result<PackageDetails> {
    debug!("Querying package info: {}", name);

    // Query format: Package|Version|Architecture|binary:Summary
    // (binary:Summary is the one-line description; the full Description
    // field is multi-line and would break the pipe-separated parse)
    let output = Command::new("dpkg-query")
        .args([
            "-W",
            "-f",
            "${Package}|${Version}|${Architecture}|${binary:Summary}",
            name,
        ])
        .output()
        .map_err(|e| Error::Query(format!("Failed to run dpkg-query: {}", e)))?;

    if !output.status.success() {
        return Err(Error::Query(format!(
            "Package '{}' not found in dpkg database",
            name
        )));
    }

    let line = String::from_utf8_lossy(&output.stdout);
    parse_details(line.trim())
        .ok_or_else(|| Error::Query(format!("Malformed dpkg-query output for {}", name)))
}

fn parse_details(line: &str) -> Option<PackageDetails> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return None;
    }

    Some(PackageDetails {
        name: parts[0].to_string(),
        version: parts[1].to_string(),
        arch: parts[2].to_string(),
        description: parts
            .get(3)
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty()),
    })
}

/// Check if dpkg is available on this system
pub fn is_available() -> bool {
    which::which("dpkg").is_ok()
}
