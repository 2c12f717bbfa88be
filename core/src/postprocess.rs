// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use jiff::Zoned;

use crate::config::TraceLevel;
use crate::expand::Expansion;
use crate::rule::RecurrenceRule;
use crate::termination::RepeatMode;

/// Turn generated occurrences into the final expansion: trim the one
/// occurrence past `UNTIL`, drop repeated instants and remove exceptions.
pub(crate) fn finish(
    mut occurrences: Vec<Zoned>,
    rule: &RecurrenceRule,
    trace: TraceLevel,
) -> Expansion {
    if let RepeatMode::Until(until) = rule.repeat()
        && occurrences
            .last()
            .is_some_and(|last| last.timestamp() > until.timestamp())
    {
        let trimmed = occurrences.pop();
        if trace.detail() {
            tracing::trace!(trimmed = ?trimmed.map(|t| t.to_string()), %until, "trimmed occurrence past until");
        }
    }

    let generated = occurrences.len();
    let mut seen = HashSet::with_capacity(generated);
    occurrences.retain(|occurrence| seen.insert(occurrence.timestamp()));
    let duplicates_removed = generated - occurrences.len();

    let mut exceptions_removed = 0;
    for exception in rule.exceptions() {
        let at = exception.timestamp();
        if let Some(index) = occurrences.iter().position(|o| o.timestamp() == at) {
            occurrences.remove(index);
            exceptions_removed += 1;
        } else if trace.detail() {
            tracing::trace!(%exception, "exception matches no occurrence");
        }
    }

    if trace.summary() {
        tracing::debug!(duplicates_removed, exceptions_removed, "post-processed occurrences");
    }

    Expansion {
        dates: occurrences,
        duplicates_removed,
        exceptions_removed,
    }
}
