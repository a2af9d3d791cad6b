// src/error.rs

//! Error types shared across the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while auditing a host against lifecycle data
#[derive(Debug, Error)]
pub enum Error {
    /// A date value that is neither `YYYY-MM-DD` nor a non-padded equivalent
    #[error("invalid date format '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The requested OS major key is absent from the lifecycle table
    #[error("target major '{0}' not found in grouped lifecycle data")]
    UnknownTarget(String),

    /// An `rpm -qa` output line that did not split into name and label
    #[error("unexpected rpm output line (expected 2 columns): '{0}'")]
    MalformedLine(String),

    /// A modularity label missing its `name:stream` components
    #[error("invalid MODULARITYLABEL format for package '{package}': '{label}'")]
    InvalidModularityLabel { package: String, label: String },

    /// No usable `VERSION_ID=` entry in the os-release file
    #[error("unable to detect VERSION_ID from {0}; pass the target major explicitly")]
    VersionIdNotFound(PathBuf),

    /// A `VERSION_ID` whose major component is not numeric
    #[error("unable to parse major version from VERSION_ID='{0}'; pass the target major explicitly")]
    InvalidVersionId(String),

    /// The external package query command failed
    #[error("failed to query installed rpm data: {0}")]
    Command(String),

    /// Failed to read a lifecycle data file
    #[error("failed to read lifecycle data file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse a lifecycle data file
    #[error("failed to parse lifecycle data file: {0}")]
    ParseData(#[from] serde_yaml::Error),

    /// A lifecycle data file whose top-level shape is not a grouped table
    #[error("invalid grouped data structure in {0}")]
    InvalidGroupedData(PathBuf),

    /// SSO or AppStream API request failure
    #[error("{0}")]
    Http(String),
}

/// Result type for lifecycle audit operations
pub type Result<T> = std::result::Result<T, Error>;
