// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expand iCalendar recurrence rules into occurrence instants.
//!
//! ```
//! use jiff::civil::date;
//! use jiff::tz::TimeZone;
//! use recur_core::RecurrenceRule;
//!
//! let tz = TimeZone::UTC;
//! let start = date(2024, 1, 1).at(9, 0, 0, 0).to_zoned(tz.clone()).unwrap();
//! let skip = date(2024, 1, 3).at(9, 0, 0, 0).to_zoned(tz.clone()).unwrap();
//!
//! let rule = RecurrenceRule::parse("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=3", &start, &[skip], tz);
//! let dates = rule.get_dates(None).unwrap();
//! assert_eq!(dates.iter().map(|d| d.day()).collect::<Vec<_>>(), vec![1, 5]);
//! ```

mod config;
mod datetime;
mod error;
mod expand;
mod postprocess;
mod rule;
mod termination;

pub use crate::config::{DEFAULT_HORIZON_YEAR, ExpandOptions, RECUR_CONFIG_ENV, TraceLevel};
pub use crate::datetime::{DateArithmetic, DateFields, Delta, Field, ZonedArithmetic};
pub use crate::error::Error;
pub use crate::expand::{Expander, Expansion};
pub use crate::rule::RecurrenceRule;
pub use crate::termination::RepeatMode;
pub use recur_ical::{
    RecurrenceFrequency, RuleKey, RuleWarning, ValueDateTime, WeekDay, WeekDayNum,
};
