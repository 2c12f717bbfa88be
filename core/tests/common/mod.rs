// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Instant and rule factories (fixtures)
//! - Assertions on expanded occurrences
//! - Temporary options files with auto-cleanup

mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use assertions::{assert_days, assert_excludes, assert_sorted_unique, assert_within};
#[allow(unused_imports)]
pub use fixtures::{expand, local, tz, utc};
#[allow(unused_imports)]
pub use temp_dir::OptionsFile;
