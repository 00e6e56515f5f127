// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! Report rendering
//!
//! Failures go to stderr, one line per record, so they survive stdout
//! redirection; the summary and the optional JSON export go to stdout.

use std::io::Write;

use owo_colors::OwoColorize;

use m3check_log::Report;

/// Render one failure line
///
/// `  <location>: <description> failed`, or the bare description when the
/// location is empty, with the `failed` marker bolded when colors are on.
fn failure_line(failure: &m3check_log::FailureRecord, color: bool) -> String {
    if color {
        format!("  {} {}", failure, "failed".bold())
    } else {
        format!("  {failure} failed")
    }
}

/// Write every failure record to the given stream
pub fn write_failures<W: Write>(out: &mut W, report: &Report, color: bool) -> std::io::Result<()> {
    for failure in &report.failures {
        writeln!(out, "{}", failure_line(failure, color))?;
    }
    Ok(())
}

/// Render the summary line plus recorded perf samples
#[must_use]
pub fn render_summary(report: &Report, color: bool) -> String {
    if color && !report.all_passed() {
        // Highlight the verdict; the perf lines stay plain.
        let mut rendered = report.to_string();
        if let Some(first_newline) = rendered.find('\n') {
            let rest = rendered.split_off(first_newline);
            format!("{}{rest}", rendered.red())
        } else {
            rendered.red().to_string()
        }
    } else {
        report.to_string()
    }
}
