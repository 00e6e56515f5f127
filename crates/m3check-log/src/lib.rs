// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! m3check-log: Simulation trace parsing for m3check
//!
//! This library crate reduces the unstructured console output of one gem5
//! simulation run (interleaved kernel messages, test framework output and
//! performance counters) to a structured [`Report`]: which named tests
//! passed or failed, why, and what performance samples were recorded.
//!
//! Parsing is deliberately permissive: the trace comes from an
//! uncontrolled upstream system, so malformed lines are skipped and
//! undecodable bytes are replaced. Semantic failures (assertions, panics,
//! child exits, a missing shutdown, fsck diagnostics) are data in the
//! report, not parser errors.
//!
//! # Example
//!
//! ```
//! use m3check_log::parse_output;
//!
//! let report = parse_output(
//!     "Testing \"alloc\" in heap:\n\
//!      Testing \"free\" in heap:\n\
//!      [PE0:core0 @1000] Shutting down\n",
//! );
//! assert_eq!(report.succeeded, 1);
//! assert!(report.all_passed());
//! ```

pub mod classify;
pub mod error;
pub mod parse;
pub mod report;
pub mod session;

pub use classify::{LineKind, PerfSample, classify};
pub use error::TraceError;
pub use parse::{LogParser, parse_file, parse_output, parse_reader};
pub use report::{FailureRecord, PerfRecord, Report};
pub use session::SessionTracker;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::TraceError;
    pub use crate::parse::{LogParser, parse_file, parse_output};
    pub use crate::report::{FailureRecord, PerfRecord, Report};
}
