// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! CLI configuration for m3check

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Check test and benchmark results in a gem5 simulation trace
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "m3check")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the simulation trace to check
    ///
    /// One run's interleaved console/log output, captured from gem5.
    pub file: PathBuf,

    /// Print the parsed report as JSON to stdout
    ///
    /// Downstream tooling reads perf entries from the report keyed by
    /// derived names such as "encr-mgate.cc: read 4096".
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable ANSI colors in failure output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with the report on
    /// stdout.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Determine the log level from the verbosity flags
    ///
    /// Verbose wins over quiet when both are given.
    #[must_use]
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

/// The usage line printed on malformed invocations
pub const USAGE: &str = "Usage: m3check <file>";

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_positional_file_argument() {
        let config =
            Config::try_parse_from(["m3check", "run.log"]).expect("parse should succeed");
        assert_eq!(config.file, PathBuf::from("run.log"));
        assert!(!config.json);
    }

    #[test]
    fn test_missing_file_argument_is_an_error() {
        let result = Config::try_parse_from(["m3check"]);
        assert!(result.is_err(), "File argument is required");
    }

    #[test]
    fn test_extra_positional_argument_is_an_error() {
        let result = Config::try_parse_from(["m3check", "a.log", "b.log"]);
        assert!(result.is_err(), "Exactly one file is accepted");
    }

    #[test]
    fn test_json_flag() {
        let config =
            Config::try_parse_from(["m3check", "--json", "run.log"]).expect("parse should succeed");
        assert!(config.json);
    }

    #[test]
    fn test_verbose_sets_debug_log_level() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_quiet_sets_warn_log_level() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), Level::WARN);
    }

    #[test]
    fn test_default_log_level_is_info() {
        let config = Config::try_parse_from(["m3check", "run.log"]).expect("parse should succeed");
        assert_eq!(config.log_level(), Level::INFO);
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        let config = Config {
            verbose: true,
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), Level::DEBUG);
    }
}
