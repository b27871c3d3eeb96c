// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `rich_flow`.
//!
//! - The `util` module contains the editor builders and the synthetic documents
//!   shared by the tests.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that every topic module can use `util`.
//! - Tests are grouped by topic and named topic-first: a test about autoscroll is
//!   `autoscroll_release_stops_ticks`, not `release_stops_autoscroll`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod editing;
mod navigation;
mod util;
