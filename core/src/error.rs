// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Errors raised while configuring or running an expansion.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The period loop ran more passes than the horizon allows without
    /// reaching any stopping condition.
    #[error("infinite loop detected: no stopping condition reached after {passes} passes")]
    InfiniteLoop {
        /// Number of passes run before giving up
        passes: usize,
    },

    /// Options that deserialized but are out of range
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The options file could not be read
    #[error("failed to read options from {path}: {source}")]
    Io {
        /// The file that was read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The options file is not valid TOML for [`crate::ExpandOptions`]
    #[error("failed to parse options: {0}")]
    Toml(#[from] toml::de::Error),
}
