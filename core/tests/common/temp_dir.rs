// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary options files for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// An options file in a temporary directory, removed on drop.
#[derive(Debug)]
pub struct OptionsFile {
    _dir: TempDir,
    path: PathBuf,
}

impl OptionsFile {
    /// Writes `contents` to a fresh `recur.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn new(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("recur.toml");
        fs::write(&path, contents)?;
        Ok(Self { _dir: dir, path })
    }

    /// Path of the options file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
