// src/osrelease.rs

//! Target major detection from the host's os-release file.
//!
//! When the caller does not name a target major key (`el8`, `el9`, ...)
//! explicitly, it is derived from the `VERSION_ID=` entry of
//! `/etc/os-release`. A missing or unreadable file and a file without a
//! `VERSION_ID` line are reported identically: either way the host could
//! not be identified and the caller must pass the key itself.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Default os-release path consulted when none is given
pub const DEFAULT_OS_RELEASE_PATH: &str = "/etc/os-release";

/// Detect the target major key (for example `el9`) from an os-release file
pub fn detect_target_major(os_release_path: Option<&Path>) -> Result<String> {
    let path = os_release_path.unwrap_or_else(|| Path::new(DEFAULT_OS_RELEASE_PATH));

    let mut version_id = None;
    if let Ok(content) = fs::read_to_string(path) {
        for line in content.lines() {
            let line = line.trim();
            if let Some(value) = line.strip_prefix("VERSION_ID=") {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                version_id = Some(value.to_string());
                break;
            }
        }
    }

    let version_id = match version_id {
        Some(value) if !value.is_empty() => value,
        _ => return Err(Error::VersionIdNotFound(path.to_path_buf())),
    };

    let major = version_id.split('.').next().unwrap_or("");
    if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidVersionId(version_id.clone()));
    }
    let major: u32 = major
        .parse()
        .map_err(|_| Error::InvalidVersionId(version_id.clone()))?;

    Ok(format!("el{major}"))
}
