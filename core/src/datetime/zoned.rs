// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Weekday;
use jiff::tz::TimeZone;
use jiff::{Span, Zoned};
use recur_ical::ValueDateTime;

use crate::datetime::{DateArithmetic, DateFields, Delta, Field};

/// [`DateArithmetic`] on `jiff::Zoned`, honouring DST transitions, month
/// lengths and leap years of the instant's time zone.
///
/// Adding months clamps to the end of shorter months, so January 31 plus one
/// month is the last day of February.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZonedArithmetic;

impl DateArithmetic for ZonedArithmetic {
    fn add(&self, at: &Zoned, delta: Delta) -> Option<Zoned> {
        let span = Span::new()
            .try_years(delta.years)
            .and_then(|s| s.try_months(delta.months))
            .and_then(|s| s.try_weeks(delta.weeks))
            .and_then(|s| s.try_days(delta.days))
            .and_then(|s| s.try_hours(delta.hours))
            .and_then(|s| s.try_minutes(delta.minutes))
            .and_then(|s| s.try_seconds(delta.seconds))
            .ok()?;
        at.checked_add(span).ok()
    }

    fn fields_of(&self, at: &Zoned) -> DateFields {
        DateFields {
            year: at.year(),
            month: at.month(),
            day: at.day(),
            hour: at.hour(),
            minute: at.minute(),
            second: at.second(),
            weekday: at.weekday(),
            days_in_month: at.days_in_month(),
        }
    }

    fn with_field(&self, at: &Zoned, field: Field, value: i32) -> Option<Zoned> {
        let with = at.with();
        let with = match field {
            Field::Year => with.year(i16::try_from(value).ok()?),
            Field::Month => with.month(i8::try_from(value).ok()?),
            Field::Day => with.day(i8::try_from(value).ok()?),
            Field::Hour => with.hour(i8::try_from(value).ok()?),
            Field::Minute => with.minute(i8::try_from(value).ok()?),
            Field::Second => with.second(i8::try_from(value).ok()?),
        };
        with.build().ok()
    }

    fn truncate(&self, at: &Zoned, unit: Field) -> Option<Zoned> {
        let with = at.with().subsec_nanosecond(0);
        let with = match unit {
            Field::Year => with.month(1).day(1).hour(0).minute(0).second(0),
            Field::Month => with.day(1).hour(0).minute(0).second(0),
            Field::Day => with.hour(0).minute(0).second(0),
            Field::Hour => with.minute(0).second(0),
            Field::Minute => with.second(0),
            Field::Second => with,
        };
        with.build().ok()
    }

    fn nth_weekday_of_month(&self, at: &Zoned, nth: i32, weekday: Weekday) -> Option<Zoned> {
        let nth = i8::try_from(nth).ok()?;
        let date = at.date().nth_weekday_of_month(nth, weekday).ok()?;
        date.to_datetime(at.time())
            .to_zoned(at.time_zone().clone())
            .ok()
    }

    fn to_local(&self, at: &Zoned, tz: &TimeZone) -> Zoned {
        at.with_time_zone(tz.clone())
    }

    fn resolve_ical(&self, value: &ValueDateTime, tz: &TimeZone) -> Option<Zoned> {
        let civil = *value.civil_date_time();
        if value.is_utc() {
            let utc = civil.to_zoned(TimeZone::UTC).ok()?;
            Some(utc.with_time_zone(tz.clone()))
        } else {
            civil.to_zoned(tz.clone()).ok()
        }
    }
}
