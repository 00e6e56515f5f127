// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! Fuzz target for line classification
//!
//! Classification must be total: every input line yields exactly one
//! kind without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;

use m3check_log::classify;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = classify(line.trim());
    }
});
