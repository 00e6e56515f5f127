// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! Report types and result aggregation
//!
//! The [`Report`] collects everything a checked run reduces to: how many
//! test units succeeded or failed, the ordered list of failures, and the
//! recorded performance samples keyed by their derived names.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::PerfSample;

/// A single recorded failure
///
/// Failures are kept in insertion order; duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Source location as `<file>:<line>`, empty for run-level failures
    /// (child exits, panics, missing shutdown, fsck diagnostics)
    pub location: String,
    /// Description of the failure
    pub description: String,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}", self.description)
        } else {
            write!(f, "{}: {}", self.location, self.description)
        }
    }
}

/// A recorded performance measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfRecord {
    /// Derived name, `<basename-of-source-file>: <label>`
    pub name: String,
    /// Measured time
    pub time: f64,
    /// Unit of the measurement
    pub unit: String,
    /// Signed variance over the runs
    pub variance: f64,
    /// Number of runs
    pub runs: u64,
}

impl fmt::Display for PerfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PERF[{}] = {} {} ({} with {} runs)",
            self.name, self.time, self.unit, self.variance, self.runs
        )
    }
}

/// The structured verdict of one simulation run
///
/// `succeeded + failed` counts explicitly finalized tests, recognized
/// performance samples and detected run-level faults. It is NOT guaranteed
/// to equal the number of test headers in the trace: a test still open at
/// end of stream is never finalized (see [`crate::parse::LogParser`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Number of test units that succeeded
    pub succeeded: usize,
    /// Number of test units that failed
    pub failed: usize,
    /// All recorded failures, in the order they were observed
    pub failures: Vec<FailureRecord>,
    /// Performance samples keyed by derived name, last write wins
    pub perf: BTreeMap<String, PerfRecord>,
}

impl Report {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure record without touching the counters
    ///
    /// Assertion failures are recorded eagerly while their test's verdict
    /// is still open; the counter moves only when the test is finalized.
    pub fn add_failure(&mut self, location: String, description: String) {
        self.failures.push(FailureRecord {
            location,
            description,
        });
    }

    /// Record a performance sample
    ///
    /// A later sample with the same derived name fully replaces an earlier
    /// one. Each recognized sample counts as one successful test unit,
    /// independent of the test session bookkeeping.
    pub fn record_perf(&mut self, sample: &PerfSample) {
        let name = sample.derived_name();
        self.perf.insert(
            name.clone(),
            PerfRecord {
                name,
                time: sample.time,
                unit: sample.unit.clone(),
                variance: sample.variance,
                runs: sample.runs,
            },
        );
        self.succeeded += 1;
    }

    /// Record an abnormal child process exit
    ///
    /// The exit code value is not inspected; any child exit line in the
    /// trace is a failure signal.
    pub fn record_child_exit(&mut self, line: &str) {
        self.failed += 1;
        self.add_failure(String::new(), line.to_string());
    }

    /// Record a panic
    pub fn record_panic(&mut self, suffix: &str) {
        self.add_failure(String::new(), format!("PANIC at {suffix}"));
        self.failed += 1;
    }

    /// Total number of counted test units
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Check whether the run is free of failures
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} tests succeeded", self.succeeded, self.total())?;
        for record in self.perf.values() {
            write!(f, "\n  {record}")?;
        }
        Ok(())
    }
}
