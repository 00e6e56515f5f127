// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! m3check: Check test and benchmark results in gem5 simulation traces
//!
//! This binary crate reads one simulation run's captured console output,
//! reduces it to a structured report and renders the verdict: failures go
//! to stderr, the summary (or JSON report) to stdout, and the exit code is
//! zero exactly when no test unit failed.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use tracing::info;

use m3check::config::{Config, USAGE};
use m3check::render;
use m3check_log::parse_file;

fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            // Malformed invocations report usage on stdout, not clap's
            // stderr rendering, since callers scrape stdout.
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so they never mix with the report on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!config.no_color && std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match run(&config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("m3check: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<ExitCode> {
    let report = parse_file(&config.file)
        .with_context(|| format!("checking {}", config.file.display()))?;

    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        perf_samples = report.perf.len(),
        "trace parsed"
    );

    if config.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
    } else {
        let stdout_color = !config.no_color && std::io::stdout().is_terminal();
        println!("{}", render::render_summary(&report, stdout_color));
    }

    let stderr_color = !config.no_color && std::io::stderr().is_terminal();
    render::write_failures(&mut std::io::stderr().lock(), &report, stderr_color)
        .context("writing failures")?;

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
