// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::Error;

/// Environment variable naming an options file.
pub const RECUR_CONFIG_ENV: &str = "RECUR_CONFIG";

/// Latest year any expansion may reach by default, the last year jiff
/// supports.
pub const DEFAULT_HORIZON_YEAR: i16 = 9999;

/// Per-call settings of an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ExpandOptions {
    /// No occurrence is generated past this year. It also caps the number
    /// of period passes, which is what turns a rule that never stops into
    /// [`Error::InfiniteLoop`].
    pub horizon_year: i16,

    /// How much of the expansion is reported through `tracing`.
    pub trace: TraceLevel,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            horizon_year: DEFAULT_HORIZON_YEAR,
            trace: TraceLevel::Off,
        }
    }
}

impl ExpandOptions {
    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when the horizon year is outside
    /// `1..=9999`.
    pub fn normalize(&mut self) -> Result<(), Error> {
        if !(1..=DEFAULT_HORIZON_YEAR).contains(&self.horizon_year) {
            return Err(Error::InvalidOptions(format!(
                "horizon_year must be within 1..={DEFAULT_HORIZON_YEAR}, got {}",
                self.horizon_year
            )));
        }
        Ok(())
    }

    /// Load options from the `[expand]` table of a TOML file.
    ///
    /// Without an explicit path the file named by `RECUR_CONFIG` is used, and
    /// without that the defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, is not valid TOML, or
    /// holds out of range values.
    #[tracing::instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match std::env::var_os(RECUR_CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => {
                    tracing::debug!("no options file given, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        content.parse()
    }
}

impl FromStr for ExpandOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let OptionsRaw { mut expand } = toml::from_str(s)?;
        expand.normalize()?;
        Ok(expand)
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct OptionsRaw {
    #[serde(default)]
    expand: ExpandOptions,
}

/// Verbosity of expansion diagnostics.
///
/// Diagnostics go through `tracing` and never change the result. `Summary`
/// reports entry, exit and stop reasons at debug level; `Detail` adds every
/// period and candidate at trace level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    /// No diagnostics, level 0
    #[default]
    Off,
    /// Entry and exit summaries, level 1
    Summary,
    /// Per period and per candidate detail, level 2
    Detail,
}

impl TraceLevel {
    /// Whether summaries are reported.
    #[must_use]
    pub fn summary(self) -> bool {
        self >= TraceLevel::Summary
    }

    /// Whether per candidate detail is reported.
    #[must_use]
    pub fn detail(self) -> bool {
        self >= TraceLevel::Detail
    }
}

impl TryFrom<u8> for TraceLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(TraceLevel::Off),
            1 => Ok(TraceLevel::Summary),
            2 => Ok(TraceLevel::Detail),
            _ => Err(Error::InvalidOptions(format!(
                "trace level must be 0, 1 or 2, got {level}"
            ))),
        }
    }
}
