// src/commands.rs
//! Command handlers for the appstream-check CLI

use crate::cli::{FetchFormat, OutputFormat};
use anyhow::{Context, Result};
use appstream_check::{
    collect_installed, detect_target_major, evaluate, load_grouped_file, parse_date,
    transform_appstreams, AppStreamClient, Error, Evaluation,
};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::process::{Command, ExitCode};
use tracing::{debug, info};

/// Environment variable holding the Red Hat SSO offline token
const OFFLINE_TOKEN_ENV: &str = "OFFLINE_ACCESS_TOKEN";

/// Full check report as rendered by the JSON/YAML formatters
#[derive(Debug, Serialize)]
struct Report {
    date: String,
    appstream_check_result: Evaluation,
    packages_to_remove: Vec<String>,
}

/// Run an external command and return its stdout
fn run_rpm_query(argv: &[&str]) -> appstream_check::Result<String> {
    let output = Command::new(argv[0])
        .args(&argv[1..])
        .output()
        .map_err(|e| Error::Command(format!("failed to run {}: {e}", argv[0])))?;

    if !output.status.success() {
        return Err(Error::Command(format!(
            "{} exited with {}",
            argv[0], output.status
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| Error::Command(format!("non-UTF-8 output from {}: {e}", argv[0])))
}

/// Check installed packages and modules against the grouped lifecycle data
pub fn cmd_check(
    grouped_data_file: &Path,
    target_major: Option<String>,
    date: Option<String>,
    output_format: OutputFormat,
    fail_on_match: bool,
) -> Result<ExitCode> {
    let table = load_grouped_file(grouped_data_file)
        .with_context(|| format!("loading {}", grouped_data_file.display()))?;

    let target_major = match target_major {
        Some(key) => key,
        None => detect_target_major(None)?,
    };

    let selected_date = date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string());
    parse_date(&selected_date)?; // validate before querying rpm
    debug!("checking {target_major} against cutoff {selected_date}");

    let inventory = collect_installed(run_rpm_query)?;
    info!(
        "inventory: {} non-modular packages, {} module streams",
        inventory.packages.len(),
        inventory.modules.len()
    );

    let (result, packages_to_remove) =
        evaluate(&table, &target_major, selected_date.as_str(), &inventory)?;

    let any_match = result.any_match;
    let report = Report {
        date: selected_date,
        appstream_check_result: result,
        packages_to_remove,
    };

    match output_format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
    }

    if fail_on_match && any_match {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_section(heading: &str, empty_message: &str, names: &[String]) {
    if names.is_empty() {
        println!("\n{empty_message}");
        return;
    }
    println!("\n{heading}:");
    for name in names {
        println!("- {name}");
    }
}

fn print_text_report(report: &Report) {
    let result = &report.appstream_check_result;

    println!("Target major: {}", result.target_major);
    println!("Date: {}", report.date);

    print_section("Outdated packages", "No outdated packages", &result.matched_packages);
    print_section("Outdated modules", "No outdated modules", &result.matched_dnf_modules);
    print_section(
        "Packages to remove",
        "No packages to remove",
        &report.packages_to_remove,
    );
}

/// Fetch lifecycle data from the Red Hat API and write the grouped file
pub fn cmd_fetch(
    output_file: &Path,
    output_format: FetchFormat,
    output_var: &str,
    print_raw: bool,
) -> Result<ExitCode> {
    let offline_token = std::env::var(OFFLINE_TOKEN_ENV).unwrap_or_default();

    let client = AppStreamClient::new()?;
    let access_token = client.login(&offline_token)?;
    let appstreams = client.get_appstreams(&access_token)?;

    if print_raw {
        println!("{}", serde_json::to_string_pretty(&appstreams)?);
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(count) = appstreams.pointer("/meta/count").and_then(Value::as_i64) {
        debug!("appstreams response received (count={count})");
    }

    let grouped = transform_appstreams(&appstreams);

    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let content = match output_format {
        FetchFormat::Json => serde_json::to_string_pretty(&grouped)?,
        FetchFormat::Yaml => {
            let mut wrapper = serde_yaml::Mapping::new();
            wrapper.insert(
                serde_yaml::Value::from(output_var),
                serde_yaml::to_value(&grouped)?,
            );
            serde_yaml::to_string(&wrapper)?
        }
    };
    std::fs::write(output_file, content)
        .with_context(|| format!("writing {}", output_file.display()))?;

    info!(
        "grouped lifecycle data for {} majors written to {}",
        grouped.len(),
        output_file.display()
    );
    Ok(ExitCode::SUCCESS)
}
