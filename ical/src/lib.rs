// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse and represent iCalendar recurrence rules (RFC 5545 `RRULE` values).
//!
//! Parsing is permissive: malformed or unsupported rule parts never abort the
//! parse. They are skipped and reported as [`RuleWarning`]s next to the rule.
//!
//! ```
//! use recur_ical::{RecurrenceFrequency, parse_rrule};
//!
//! let (rule, warnings) = parse_rrule("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10");
//! assert_eq!(rule.freq, Some(RecurrenceFrequency::Weekly));
//! assert_eq!(rule.by_day.len(), 3);
//! assert!(warnings.is_empty());
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else, clippy::match_bool)]

pub mod keyword;
pub mod value;

pub use crate::value::{
    RecurrenceFrequency, RepeatLimit, RuleKey, RuleWarning, ValueDate, ValueDateTime,
    ValueRecurrenceRule, ValueTime, WeekDay, WeekDayNum, parse_date_time, parse_rrule,
};
