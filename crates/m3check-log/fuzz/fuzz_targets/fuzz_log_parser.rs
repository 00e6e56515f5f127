// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! Fuzz target for the streaming trace parser
//!
//! Feeds arbitrary bytes through the lossy line reader; the parser must
//! never panic and must always produce a report.

#![no_main]

use libfuzzer_sys::fuzz_target;

use m3check_log::{LogParser, parse_reader};

fuzz_target!(|data: &[u8]| {
    // Lossy byte-level path
    let _ = parse_reader(data);

    // Line-level path - parser should never panic
    if let Ok(input) = std::str::from_utf8(data) {
        let mut parser = LogParser::new();
        for line in input.lines() {
            parser.process_line(line);
        }
        let _ = parser.finish();
    }
});
