// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! Test session tracking
//!
//! The trace announces tests with header lines but carries no explicit
//! end-of-test marker. A test's verdict therefore becomes known only when
//! the NEXT header is observed: zero failed assertions since its own
//! header means it succeeded. The tracker holds the currently open test
//! and its assertion counter and moves the report counters on
//! finalization.
//!
//! Two deliberate consequences of this scheme are preserved exactly, since
//! downstream tooling depends on the counts:
//! - a test still open at end of stream is never finalized and never
//!   counted,
//! - the assertion counter is reset only on finalization, so assertion
//!   failures seen before the first header leak into the first test's
//!   verdict.

use crate::report::Report;

/// Stateful accumulator for the currently open test
#[derive(Debug, Default)]
pub struct SessionTracker {
    open_test: Option<String>,
    failed_assertions: usize,
}

impl SessionTracker {
    /// Create a tracker with no open test
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the currently open test, if any
    #[must_use]
    pub fn open_test(&self) -> Option<&str> {
        self.open_test.as_deref()
    }

    /// Number of failed assertions attributed to the open verdict
    #[must_use]
    pub fn failed_assertions(&self) -> usize {
        self.failed_assertions
    }

    /// Observe a test header: finalize the previously open test, then open
    /// the newly named one
    pub fn on_test_header(&mut self, name: String, report: &mut Report) {
        if self.open_test.is_some() {
            if self.failed_assertions == 0 {
                report.succeeded += 1;
            } else {
                report.failed += 1;
            }
            self.failed_assertions = 0;
        }
        self.open_test = Some(name);
    }

    /// Observe a failed assertion
    ///
    /// The failure record is appended immediately, independent of whether
    /// the surrounding test is ever finalized.
    pub fn on_failed_assertion(
        &mut self,
        location: String,
        description: String,
        report: &mut Report,
    ) {
        report.add_failure(location, description);
        self.failed_assertions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_first_header_finalizes_nothing() {
        let mut tracker = SessionTracker::new();
        let mut report = Report::new();

        tracker.on_test_header("alloc".to_string(), &mut report);

        assert_eq!(tracker.open_test(), Some("alloc"));
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_clean_test_finalized_as_succeeded() {
        let mut tracker = SessionTracker::new();
        let mut report = Report::new();

        tracker.on_test_header("alloc".to_string(), &mut report);
        tracker.on_test_header("free".to_string(), &mut report);

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(tracker.open_test(), Some("free"));
    }

    #[test]
    fn test_failing_test_finalized_as_failed() {
        let mut tracker = SessionTracker::new();
        let mut report = Report::new();

        tracker.on_test_header("alloc".to_string(), &mut report);
        tracker.on_failed_assertion("heap.cc:10".to_string(), "assert".to_string(), &mut report);
        tracker.on_failed_assertion("heap.cc:11".to_string(), "assert".to_string(), &mut report);
        tracker.on_test_header("free".to_string(), &mut report);

        // Two assertions, but one failed test unit.
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failures.len(), 2);
        // The counter was reset for the new test.
        assert_eq!(tracker.failed_assertions(), 0);
    }

    #[test]
    fn test_assertions_recorded_eagerly_without_open_test() {
        let mut tracker = SessionTracker::new();
        let mut report = Report::new();

        tracker.on_failed_assertion("boot.cc:5".to_string(), "check".to_string(), &mut report);

        assert_eq!(tracker.open_test(), None);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].location, "boot.cc:5");
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_pre_header_assertions_leak_into_first_test() {
        let mut tracker = SessionTracker::new();
        let mut report = Report::new();

        // An assertion before any header bumps the counter, and the first
        // header does not reset it. The first test is finalized as failed
        // even though it had no assertions of its own.
        tracker.on_failed_assertion("boot.cc:5".to_string(), "check".to_string(), &mut report);
        tracker.on_test_header("alloc".to_string(), &mut report);
        tracker.on_test_header("free".to_string(), &mut report);

        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 0);
    }
}
