// src/lib.rs

//! AppStream lifecycle audit
//!
//! Compares a host's installed RPM packages and DNF module streams against
//! Red Hat AppStream lifecycle data and reports which of them are retired
//! (past end-of-life) relative to a cutoff date, together with an
//! aggregated removal list.
//!
//! # Architecture
//!
//! - `date` / `osrelease`: input normalization (cutoff dates, target major
//!   detection from os-release)
//! - `inventory`: parses `rpm -qa` modularity output into installed
//!   packages and module streams
//! - `lifecycle`: the grouped reference table, its file loader, and the
//!   retirement evaluator
//! - `transform` / `fetch`: turn the raw lifecycle API payload into the
//!   grouped table (used by the `fetch` command only)
//!
//! The evaluation core is pure: it performs no network I/O, keeps no state
//! between calls, and never mutates the host.

pub mod date;
mod error;
pub mod fetch;
pub mod inventory;
pub mod lifecycle;
pub mod osrelease;
pub mod transform;

pub use date::{parse_date, DateSpec};
pub use error::{Error, Result};
pub use fetch::AppStreamClient;
pub use inventory::{collect_installed, parse_rpm_output, Inventory, RPM_QUERY_ARGS};
pub use lifecycle::{
    evaluate, load_grouped_file, Evaluation, LifecycleTable, MajorLifecycle, ModuleEntry,
    PackageEntry, GROUPED_DATA_VAR,
};
pub use osrelease::{detect_target_major, DEFAULT_OS_RELEASE_PATH};
pub use transform::transform_appstreams;
