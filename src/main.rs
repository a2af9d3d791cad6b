// src/main.rs

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    // Logs go to stderr so json/yaml reports on stdout stay parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            grouped_data_file,
            target_major,
            date,
            output_format,
            fail_on_match,
        } => commands::cmd_check(
            &grouped_data_file,
            target_major,
            date,
            output_format,
            fail_on_match,
        ),
        Commands::Fetch {
            output_file,
            output_format,
            output_var,
            print_raw,
        } => commands::cmd_fetch(&output_file, output_format, &output_var, print_raw),
    }
}
