// src/lifecycle.rs

//! Lifecycle reference table and retirement evaluation.
//!
//! The reference table maps an OS major key (`el8`, `el9`, ...) to the
//! AppStream lifecycle entries published for that release: plain `package`
//! entries and `dnf_module` entries, each carrying an optional end-of-life
//! date. The evaluator intersects a host's installed inventory with the
//! entries retired as of a cutoff date and aggregates the packages that
//! should be removed or replaced.
//!
//! The table is third-party data the evaluator does not control: entries
//! with missing names, missing streams, or malformed end dates are treated
//! as "not retired" rather than rejected, so a partially broken data file
//! degrades to fewer matches instead of aborting a host audit.

use crate::date::{parse_date, DateSpec};
use crate::error::{Error, Result};
use crate::inventory::Inventory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Wrapper key used when the grouped table is stored inside a vars file
pub const GROUPED_DATA_VAR: &str = "appstream_check_grouped";

/// A plain (non-modular) package lifecycle entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// A DNF module stream lifecycle entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stream: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Lifecycle entries for one OS major release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorLifecycle {
    #[serde(default)]
    pub package: Vec<PackageEntry>,
    #[serde(default)]
    pub dnf_module: Vec<ModuleEntry>,
}

/// Grouped lifecycle table keyed by OS major (`el8`, `el9`, ...)
pub type LifecycleTable = BTreeMap<String, MajorLifecycle>;

/// Outcome of evaluating a host inventory against the lifecycle table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// OS major key the table was queried with
    pub target_major: String,
    /// Installed non-modular packages past end-of-life, sorted
    pub matched_packages: Vec<String>,
    /// Installed module stream keys past end-of-life, sorted
    pub matched_dnf_modules: Vec<String>,
    /// Packages installed from matched module streams, sorted
    pub matched_dnf_modules_packages: Vec<String>,
    /// Whether any retired package or module was matched
    pub any_match: bool,
}

/// Load a grouped lifecycle table from a YAML or JSON file
///
/// Accepts either the bare table or a document wrapping it under the
/// [`GROUPED_DATA_VAR`] key, as written by the `fetch` command.
pub fn load_grouped_file(path: &Path) -> Result<LifecycleTable> {
    let content = fs::read_to_string(path)?;
    let mut document: serde_yaml::Value = serde_yaml::from_str(&content)?;

    if let Some(wrapped) = document.get_mut(GROUPED_DATA_VAR) {
        if wrapped.is_mapping() {
            return serde_yaml::from_value(wrapped.clone()).map_err(Error::ParseData);
        }
    }

    if document.is_mapping() {
        return serde_yaml::from_value(document).map_err(Error::ParseData);
    }

    Err(Error::InvalidGroupedData(path.to_path_buf()))
}

/// True when `end_date` holds a parseable date strictly before `cutoff`
///
/// Null, empty, and unparseable end dates never retire an entry.
fn is_retired(end_date: Option<&str>, cutoff: NaiveDate) -> bool {
    match end_date {
        None | Some("") => false,
        Some(text) => parse_date(text).map(|date| date < cutoff).unwrap_or(false),
    }
}

/// Evaluate an installed inventory against the lifecycle table
///
/// Returns the structured [`Evaluation`] plus the aggregated removal list:
/// matched plain packages unioned with every package installed from a
/// matched module stream, deduplicated and sorted.
pub fn evaluate(
    table: &LifecycleTable,
    target_major: &str,
    cutoff: impl Into<DateSpec>,
    inventory: &Inventory,
) -> Result<(Evaluation, Vec<String>)> {
    let major_data = table
        .get(target_major)
        .ok_or_else(|| Error::UnknownTarget(target_major.to_string()))?;

    let cutoff = cutoff.into().resolve()?;

    let retired_packages: BTreeSet<&str> = major_data
        .package
        .iter()
        .filter(|entry| !entry.name.is_empty() && is_retired(entry.end_date.as_deref(), cutoff))
        .map(|entry| entry.name.as_str())
        .collect();

    let retired_modules: BTreeSet<String> = major_data
        .dnf_module
        .iter()
        .filter(|entry| {
            !entry.name.is_empty()
                && !entry.stream.is_empty()
                && is_retired(entry.end_date.as_deref(), cutoff)
        })
        .map(|entry| format!("{}:{}", entry.name, entry.stream))
        .collect();

    let matched_packages: Vec<String> = inventory
        .packages
        .iter()
        .filter(|name| retired_packages.contains(name.as_str()))
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let matched_dnf_modules: Vec<String> = inventory
        .modules
        .keys()
        .filter(|key| retired_modules.contains(key.as_str()))
        .cloned()
        .collect();

    let matched_dnf_modules_packages: Vec<String> = matched_dnf_modules
        .iter()
        .filter_map(|key| inventory.modules.get(key))
        .flatten()
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let any_match = !matched_packages.is_empty() || !matched_dnf_modules.is_empty();

    let packages_to_remove: Vec<String> = matched_packages
        .iter()
        .chain(&matched_dnf_modules_packages)
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let evaluation = Evaluation {
        target_major: target_major.to_string(),
        matched_packages,
        matched_dnf_modules,
        matched_dnf_modules_packages,
        any_match,
    };

    Ok((evaluation, packages_to_remove))
}
