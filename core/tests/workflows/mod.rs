// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end expansion tests for the recur-core crate.
//!
//! These tests parse rule text, expand it and check the occurrences, covering
//! the documented scenarios, the ordering and exclusion guarantees, time zone
//! handling and file driven options.

mod config_driven;
mod properties;
mod scenarios;
mod time_zones;
