// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Time zone aware date arithmetic used by the expansion engine.
//!
//! The engine never touches calendar math directly. Everything goes through
//! [`DateArithmetic`], so alternative calendars or test doubles can be
//! plugged in. [`ZonedArithmetic`] is the implementation backed by jiff.

mod zoned;

pub use zoned::ZonedArithmetic;

use jiff::Zoned;
use jiff::civil::Weekday;
use jiff::tz::TimeZone;
use recur_ical::ValueDateTime;

/// Calendar fields of an instant, read in its own time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    /// Year
    pub year: i16,
    /// Month, 1-12
    pub month: i8,
    /// Day of month, 1-31
    pub day: i8,
    /// Hour, 0-23
    pub hour: i8,
    /// Minute, 0-59
    pub minute: i8,
    /// Second, 0-59
    pub second: i8,
    /// Day of week
    pub weekday: Weekday,
    /// Number of days in the month
    pub days_in_month: i8,
}

/// A calendar field, or the unit that field counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// An amount of calendar time to add. Calendar units (years to days) follow
/// the wall clock, time units (hours to seconds) are exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delta {
    /// Years
    pub years: i64,
    /// Months
    pub months: i64,
    /// Weeks
    pub weeks: i64,
    /// Days
    pub days: i64,
    /// Hours
    pub hours: i64,
    /// Minutes
    pub minutes: i64,
    /// Seconds
    pub seconds: i64,
}

impl Delta {
    /// A delta of `n` years.
    #[must_use]
    pub const fn years(n: i64) -> Self {
        Self { years: n, ..Self::ZERO }
    }

    /// A delta of `n` months.
    #[must_use]
    pub const fn months(n: i64) -> Self {
        Self { months: n, ..Self::ZERO }
    }

    /// A delta of `n` weeks.
    #[must_use]
    pub const fn weeks(n: i64) -> Self {
        Self { weeks: n, ..Self::ZERO }
    }

    /// A delta of `n` days.
    #[must_use]
    pub const fn days(n: i64) -> Self {
        Self { days: n, ..Self::ZERO }
    }

    /// A delta of `n` hours.
    #[must_use]
    pub const fn hours(n: i64) -> Self {
        Self { hours: n, ..Self::ZERO }
    }

    /// A delta of `n` minutes.
    #[must_use]
    pub const fn minutes(n: i64) -> Self {
        Self { minutes: n, ..Self::ZERO }
    }

    /// A delta of `n` seconds.
    #[must_use]
    pub const fn seconds(n: i64) -> Self {
        Self { seconds: n, ..Self::ZERO }
    }

    const ZERO: Self = Self {
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };
}

/// Time zone aware instant arithmetic.
///
/// Every operation that can leave the representable range or name a
/// calendar date that does not exist returns `None`. Instants keep the time
/// zone they carry; only [`DateArithmetic::to_local`] changes it.
pub trait DateArithmetic {
    /// Add `delta` to `at`, in `at`'s time zone.
    fn add(&self, at: &Zoned, delta: Delta) -> Option<Zoned>;

    /// Decompose `at` into calendar fields.
    fn fields_of(&self, at: &Zoned) -> DateFields;

    /// Replace one calendar field of `at`, keeping the others.
    fn with_field(&self, at: &Zoned, field: Field, value: i32) -> Option<Zoned>;

    /// Start of the `unit` containing `at`, e.g. midnight for [`Field::Day`].
    fn truncate(&self, at: &Zoned, unit: Field) -> Option<Zoned>;

    /// The `nth` `weekday` of `at`'s month at `at`'s time of day. Negative
    /// `nth` counts from the end of the month.
    fn nth_weekday_of_month(&self, at: &Zoned, nth: i32, weekday: Weekday) -> Option<Zoned>;

    /// The same instant seen from `tz`.
    fn to_local(&self, at: &Zoned, tz: &TimeZone) -> Zoned;

    /// Resolve an ICAL DATE or DATE-TIME into an instant in `tz`. UTC values
    /// name an absolute instant, floating values are read as wall time in
    /// `tz`.
    fn resolve_ical(&self, value: &ValueDateTime, tz: &TimeZone) -> Option<Zoned>;
}
