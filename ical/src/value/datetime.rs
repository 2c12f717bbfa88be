// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DATE and DATE-TIME values as used by the `UNTIL` rule part.

use std::fmt::{self, Display};

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::{Input, Stream};
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::value::join_errors;
use crate::value::miscellaneous::{
    ValueExpected, i8_0_1, i8_0_2, i8_0_9, i8_1_2, i8_1_9, i16_0_9, u8_0_1, u8_0_3, u8_0_5,
    u8_0_9,
};

/// Date value in the iCalendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,

    /// Month component, 1-12.
    pub month: i8,

    /// Day component, 1-31.
    pub day: i8,
}

impl ValueDate {
    /// Convert to `jiff::civil::Date`.
    #[must_use]
    pub fn civil_date(self) -> jiff::civil::Date {
        self.into()
    }
}

impl From<ValueDate> for jiff::civil::Date {
    fn from(value: ValueDate) -> Self {
        jiff::civil::date(value.year, value.month, value.day)
    }
}

impl Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Time value defined in the RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: u8,

    /// Minute component, 0-59.
    pub minute: u8,

    /// Second component, 0-60 (60 for leap second).
    pub second: u8,

    /// Whether the time is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
}

impl ValueTime {
    /// Convert to `jiff::civil::Time`, contracting a leap second to 59.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn civil_time(self) -> jiff::civil::Time {
        jiff::civil::time(
            self.hour as i8,
            self.minute as i8,
            self.second.min(59) as i8,
            0,
        )
    }
}

impl Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// End date of a recurrence: a DATE, or a DATE-TIME that is floating or UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component, absent for a DATE value.
    pub time: Option<ValueTime>,

    /// Cached civil datetime, midnight for a DATE value
    jiff: jiff::civil::DateTime,
}

impl ValueDateTime {
    fn new(date: ValueDate, time: Option<ValueTime>) -> Self {
        let civil_time = time.map_or(jiff::civil::Time::midnight(), ValueTime::civil_time);
        Self {
            date,
            time,
            jiff: date.civil_date().to_datetime(civil_time),
        }
    }

    /// Get reference to cached `jiff::civil::DateTime`.
    #[must_use]
    pub const fn civil_date_time(&self) -> &jiff::civil::DateTime {
        &self.jiff
    }

    /// Whether the value names an absolute UTC instant.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.time.is_some_and(|t| t.utc)
    }

    /// Whether the value is a DATE without time of day.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        self.time.is_none()
    }
}

impl Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(f, "{}T{time}", self.date),
            None => write!(f, "{}", self.date),
        }
    }
}

/// Parses a complete DATE or DATE-TIME string, such as `20230101`,
/// `20230101T090000` or `20230101T090000Z`.
///
/// # Errors
///
/// Returns the joined parse errors when `src` is not a valid date or
/// date-time, including calendar dates that do not exist.
pub fn parse_date_time(src: &str) -> Result<ValueDateTime, String> {
    enddate::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| join_errors(&errs))
}

/// ```txt
/// enddate     = date / date-time
/// date-time   = date "T" time
/// ```
fn enddate<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then(just('T').ignore_then(value_time()).or_not())
        .map(|(date, time)| ValueDateTime::new(date, time))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
fn value_date<'src, I, E>() -> impl Parser<'src, I, ValueDate, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            if jiff::civil::Date::new(year, month, day).is_err() {
                Err(E::Error::expected_found([ValueExpected::Date], None, span))
            } else {
                Ok(ValueDate { year, month, day })
            }
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
fn value_time<'src, I, E>() -> impl Parser<'src, I, ValueTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| ValueTime {
            hour,
            minute,
            second,
            utc: utc.is_some(),
        })
}

fn time_hour<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0').ignored().to(60)), // leap second
    ))
}
