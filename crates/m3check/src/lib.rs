// Copyright (c) 2026 - present The m3check authors
// SPDX-License-Identifier: MIT

//! m3check library
//!
//! This module exports the CLI surface of m3check for use in integration
//! tests and as a library.

pub mod config;
pub mod render;
