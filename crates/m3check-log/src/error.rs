// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! Error types for m3check-log

use thiserror::Error;

/// Errors that can occur while reading a simulation trace
///
/// Malformed trace lines are never errors: the trace is produced by an
/// uncontrolled upstream system, so unrecognized content is skipped and
/// only the inability to access the input at all is fatal.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Error opening the trace file
    #[error("Cannot open trace file {path}: {source}")]
    Open {
        /// The path that could not be opened
        path: String,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Error reading trace data
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
