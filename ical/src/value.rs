// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value types of recurrence rules and their parsers.
//!
//! The grammars follow RFC 5545 Section 3.3 and are written with chumsky.
//! Each public entry point runs a grammar over a complete string.

mod datetime;
mod miscellaneous;
mod numeric;
mod rrule;

pub use datetime::{ValueDate, ValueDateTime, ValueTime, parse_date_time};
pub use rrule::{
    RecurrenceFrequency, RepeatLimit, RuleKey, RuleWarning, ValueRecurrenceRule, WeekDay,
    WeekDayNum, parse_rrule,
};

use chumsky::error::Rich;

/// Joins parse errors into a single human readable reason.
fn join_errors(errs: &[Rich<'_, char>]) -> String {
    errs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
