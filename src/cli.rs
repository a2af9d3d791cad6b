// src/cli.rs
//! CLI definitions for the appstream-check tool
//!
//! Command implementations live in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default location of the grouped lifecycle data file
pub const DEFAULT_GROUPED_DATA_FILE: &str = "/etc/appstream-check/redhat_appstreams.yml";

#[derive(Parser)]
#[command(name = "appstream-check")]
#[command(version)]
#[command(about = "Audit installed RPM packages and module streams against AppStream lifecycle data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check installed packages and modules against lifecycle data
    Check {
        /// Path to the grouped lifecycle data file
        #[arg(short, long, default_value = DEFAULT_GROUPED_DATA_FILE)]
        grouped_data_file: PathBuf,

        /// Target major key, e.g. el8/el9 (auto-detected from os-release if omitted)
        #[arg(short, long)]
        target_major: Option<String>,

        /// Comparison date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output_format: OutputFormat,

        /// Exit with code 2 when outdated packages/modules are detected
        #[arg(long)]
        fail_on_match: bool,
    },

    /// Fetch lifecycle data from the Red Hat API and write the grouped file
    ///
    /// Requires an offline token in the OFFLINE_ACCESS_TOKEN environment
    /// variable (create one at https://access.redhat.com/management/api).
    Fetch {
        /// Path to write the grouped lifecycle data file
        #[arg(short = 'o', long, default_value = DEFAULT_GROUPED_DATA_FILE)]
        output_file: PathBuf,

        /// Output format for the grouped data file
        #[arg(short = 'f', long, value_enum, default_value = "yaml")]
        output_format: FetchFormat,

        /// Variable name wrapping the table in YAML output
        #[arg(long, default_value = appstream_check::GROUPED_DATA_VAR)]
        output_var: String,

        /// Pretty-print the raw API response and exit without writing
        #[arg(long)]
        print_raw: bool,
    },
}

/// Report output formats for the check command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// On-disk formats for fetched lifecycle data
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchFormat {
    Json,
    Yaml,
}
