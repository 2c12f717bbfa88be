// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use jiff::Zoned;
use jiff::civil::date;
use jiff::tz::TimeZone;
use recur_core::RecurrenceRule;

/// Looks up a time zone from the bundled database.
///
/// # Panics
///
/// Panics if the zone is unknown.
#[must_use]
pub fn tz(name: &str) -> TimeZone {
    TimeZone::get(name).unwrap_or_else(|e| panic!("unknown time zone {name}: {e}"))
}

/// Creates an instant at a whole minute in UTC.
#[must_use]
pub fn utc(year: i16, month: i8, day: i8, hour: i8, minute: i8) -> Zoned {
    local(&TimeZone::UTC, year, month, day, hour, minute)
}

/// Creates an instant at a whole minute of local time.
///
/// # Panics
///
/// Panics if the date is invalid.
#[must_use]
pub fn local(tz: &TimeZone, year: i16, month: i8, day: i8, hour: i8, minute: i8) -> Zoned {
    date(year, month, day)
        .at(hour, minute, 0, 0)
        .to_zoned(tz.clone())
        .expect("valid local date time")
}

/// Parses and expands a rule without a maxdate.
///
/// # Panics
///
/// Panics if the expansion fails.
#[must_use]
pub fn expand(text: &str, start: &Zoned, exceptions: &[Zoned], tz: &TimeZone) -> Vec<Zoned> {
    RecurrenceRule::parse(text, start, exceptions, tz.clone())
        .get_dates(None)
        .unwrap_or_else(|e| panic!("expanding {text} failed: {e}"))
}
