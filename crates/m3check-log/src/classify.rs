// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! Line classification for simulation traces
//!
//! A gem5 run interleaves kernel messages, test framework output and
//! performance counters in one text stream. This module maps a single
//! trimmed line to exactly one [`LineKind`]. Classification is ordered and
//! mutually exclusive: the matchers in [`MATCHERS`] are tried in a fixed
//! priority order and the first hit wins, since some lines could
//! structurally match more than one pattern family (an assertion line also
//! looks like a perf line up to its suffix, a panic inside an fsck message
//! must stay an fsck diagnostic).

use std::sync::LazyLock;

use regex::Regex;

static RE_TEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^Testing "(.*?)" in (.*?):$"#).expect("test header regex"));
static RE_FAILED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!\s+([^:]+):(\d+)\s+(.*?) FAILED$").expect("failed assertion regex")
});
static RE_PERF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^.*!\s+([^:]+):(\d+)\s+PERF\s+"(.*?)": ([\d.]+) (\S+?) \(\+/- ([0-9\-.]+) with (\d+) runs\)$"#)
        .expect("perf sample regex")
});
static RE_SHUTDOWN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*\[(PE0:\S+\s*@\s*\d+|\S+\s*@\d+)\].*Shutting down$").expect("shutdown regex")
});
static RE_EXIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*Child .*? exited with exitcode \d+$").expect("child exit regex")
});
static RE_FSCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*(m3fsck:.*)$").expect("fsck regex"));
static RE_PANIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*PANIC at(.*)$").expect("panic regex"));

/// A recognized performance counter line
///
/// Emitted by the benchmark framework as
/// `! <file>:<line> PERF "<label>": <time> <unit> (+/- <variance> with <runs> runs)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfSample {
    /// Source file that produced the measurement
    pub file: String,
    /// Source line of the measurement
    pub line: u32,
    /// Free-text label of the measurement
    pub label: String,
    /// Measured time
    pub time: f64,
    /// Unit of the measurement (e.g. `cycles/iter`)
    pub unit: String,
    /// Signed variance over the runs
    pub variance: f64,
    /// Number of runs the measurement averages over
    pub runs: u64,
}

impl PerfSample {
    /// Name under which this sample is keyed in the report
    ///
    /// `<basename>: <label>`, where basename is the last `/`-delimited
    /// segment of the source file path. Downstream tooling looks perf
    /// entries up under names like `"encr-mgate.cc: read 4096"`.
    #[must_use]
    pub fn derived_name(&self) -> String {
        let basename = self.file.rsplit('/').next().unwrap_or(&self.file);
        format!("{}: {}", basename, self.label)
    }
}

/// The kind of a single trace line, plus its captured fields
///
/// Classification is total: every line belongs to exactly one kind,
/// possibly [`LineKind::Unrecognized`].
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Start of a new named test case
    TestHeader {
        /// Name of the test
        name: String,
    },
    /// A reported check failure inside a test
    FailedAssertion {
        /// Source file of the assertion
        file: String,
        /// Source line of the assertion
        line: u32,
        /// Description of the failed check
        description: String,
    },
    /// A named timing measurement
    PerfSample(PerfSample),
    /// The simulated kernel executed an orderly shutdown
    ShutdownMarker,
    /// A child process terminated; the exit code value is not inspected
    ChildExit,
    /// A message from the filesystem integrity checker
    FsckDiagnostic {
        /// The diagnostic text, including the `m3fsck:` prefix
        message: String,
    },
    /// A kernel or application panic
    Panic {
        /// Everything following the `PANIC at` marker
        suffix: String,
    },
    /// None of the above; skipped without any state change
    Unrecognized,
}

type Matcher = fn(&str) -> Option<LineKind>;

/// Matchers in priority order; the first match wins.
const MATCHERS: &[Matcher] = &[
    match_test_header,
    match_failed_assertion,
    match_perf_sample,
    match_shutdown,
    match_child_exit,
    match_fsck,
    match_panic,
];

/// Classify one trimmed trace line
#[must_use]
pub fn classify(line: &str) -> LineKind {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(line))
        .unwrap_or(LineKind::Unrecognized)
}

fn match_test_header(line: &str) -> Option<LineKind> {
    let caps = RE_TEST.captures(line)?;
    Some(LineKind::TestHeader {
        name: caps[1].to_string(),
    })
}

fn match_failed_assertion(line: &str) -> Option<LineKind> {
    let caps = RE_FAILED.captures(line)?;
    Some(LineKind::FailedAssertion {
        file: caps[1].to_string(),
        line: caps[2].parse().ok()?,
        description: caps[3].to_string(),
    })
}

fn match_perf_sample(line: &str) -> Option<LineKind> {
    let caps = RE_PERF.captures(line)?;
    // A numeric field too large to represent drops the line through to the
    // lower-priority matchers instead of aborting the parse.
    Some(LineKind::PerfSample(PerfSample {
        file: caps[1].to_string(),
        line: caps[2].parse().ok()?,
        label: caps[3].to_string(),
        time: caps[4].parse().ok()?,
        unit: caps[5].to_string(),
        variance: caps[6].parse().ok()?,
        runs: caps[7].parse().ok()?,
    }))
}

fn match_shutdown(line: &str) -> Option<LineKind> {
    RE_SHUTDOWN.is_match(line).then_some(LineKind::ShutdownMarker)
}

fn match_child_exit(line: &str) -> Option<LineKind> {
    RE_EXIT.is_match(line).then_some(LineKind::ChildExit)
}

fn match_fsck(line: &str) -> Option<LineKind> {
    let caps = RE_FSCK.captures(line)?;
    Some(LineKind::FsckDiagnostic {
        message: caps[1].to_string(),
    })
}

fn match_panic(line: &str) -> Option<LineKind> {
    let caps = RE_PANIC.captures(line)?;
    Some(LineKind::Panic {
        suffix: caps[1].to_string(),
    })
}
