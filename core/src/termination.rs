// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;

/// How a recurrence ends, with `UNTIL` resolved to an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatMode {
    /// Stop once this many occurrences were generated
    Count(u32),
    /// Stop once an occurrence past this instant was generated
    Until(Zoned),
    /// Only the horizon and the loop guard stop the expansion
    Forever,
}

impl RepeatMode {
    /// Whether the occurrences generated so far already fill the quota.
    ///
    /// In until mode the quota is filled by the first occurrence after the
    /// limit, which post-processing trims again.
    #[must_use]
    pub fn is_satisfied(&self, occurrences: &[Zoned]) -> bool {
        match self {
            RepeatMode::Count(count) => {
                usize::try_from(*count).is_ok_and(|count| occurrences.len() >= count)
            }
            RepeatMode::Until(until) => occurrences
                .last()
                .is_some_and(|last| last.timestamp() > until.timestamp()),
            RepeatMode::Forever => false,
        }
    }
}
