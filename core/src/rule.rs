// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;
use jiff::tz::TimeZone;
use recur_ical::{
    RecurrenceFrequency, RepeatLimit, RuleKey, RuleWarning, WeekDayNum, parse_rrule,
};

use crate::Error;
use crate::datetime::{DateArithmetic, ZonedArithmetic};
use crate::expand::Expander;
use crate::termination::RepeatMode;

/// A recurrence rule bound to its start, exceptions and time zone.
///
/// The rule is immutable once parsed. All local date arithmetic happens in
/// [`RecurrenceRule::time_zone`], and the start and exception instants are
/// stored converted into it.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    frequency: Option<RecurrenceFrequency>,
    interval: u32,
    repeat: RepeatMode,
    by_second: Vec<i32>,
    by_minute: Vec<i32>,
    by_hour: Vec<i32>,
    by_day: Vec<WeekDayNum>,
    by_month_day: Vec<i32>,
    by_month: Vec<i32>,
    by_year: Vec<i32>,
    by_set_pos: Vec<i32>,
    start: Zoned,
    time_zone: TimeZone,
    exceptions: Vec<Zoned>,
    warnings: Vec<RuleWarning>,
}

impl RecurrenceRule {
    /// Parse `text`, an `RRULE` value, for an event starting at `start`.
    ///
    /// Parsing is permissive. Parts that cannot be used are skipped, logged
    /// as warnings and kept in [`RecurrenceRule::warnings`].
    #[must_use]
    pub fn parse(text: &str, start: &Zoned, exceptions: &[Zoned], time_zone: TimeZone) -> Self {
        Self::parse_with(&ZonedArithmetic, text, start, exceptions, time_zone)
    }

    /// Same as [`RecurrenceRule::parse`], resolving `UNTIL` and converting
    /// instants with the given arithmetic.
    #[tracing::instrument(skip_all, fields(rule = text))]
    pub fn parse_with<A: DateArithmetic>(
        arith: &A,
        text: &str,
        start: &Zoned,
        exceptions: &[Zoned],
        time_zone: TimeZone,
    ) -> Self {
        let (value, mut warnings) = parse_rrule(text);

        let repeat = match value.limit {
            RepeatLimit::Count(count) => RepeatMode::Count(count),
            RepeatLimit::Until(until) => match arith.resolve_ical(&until, &time_zone) {
                Some(instant) => RepeatMode::Until(instant),
                None => {
                    warnings.push(RuleWarning::InvalidValue {
                        key: RuleKey::Until,
                        value: until.to_string(),
                        reason: "not representable in the rule's time zone".to_owned(),
                    });
                    RepeatMode::Forever
                }
            },
            RepeatLimit::Forever => RepeatMode::Forever,
        };

        for warning in &warnings {
            tracing::warn!(%warning, "ignoring part of recurrence rule");
        }

        Self {
            frequency: value.freq,
            interval: value.interval,
            repeat,
            by_second: value.by_second,
            by_minute: value.by_minute,
            by_hour: value.by_hour,
            by_day: value.by_day,
            by_month_day: value.by_month_day,
            by_month: value.by_month,
            by_year: value.by_year,
            by_set_pos: value.by_set_pos,
            start: arith.to_local(start, &time_zone),
            exceptions: exceptions
                .iter()
                .map(|exception| arith.to_local(exception, &time_zone))
                .collect(),
            time_zone,
            warnings,
        }
    }

    /// Expand the rule with default options.
    ///
    /// Occurrences are generated until the rule's count or until is reached,
    /// the cursor passes `maxdate`, or the horizon year is reached. See
    /// [`Expander`] for options and custom arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InfiniteLoop`] when none of those happens within the
    /// horizon's pass budget.
    pub fn get_dates(&self, maxdate: Option<&Zoned>) -> Result<Vec<Zoned>, Error> {
        Expander::new(self).get_dates(maxdate)
    }

    /// Frequency, `None` if the rule has none.
    #[must_use]
    pub fn frequency(&self) -> Option<RecurrenceFrequency> {
        self.frequency
    }

    /// Interval between periods, at least 1.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// How the recurrence ends.
    #[must_use]
    pub fn repeat(&self) -> &RepeatMode {
        &self.repeat
    }

    /// Seconds of the minute to expand to.
    #[must_use]
    pub fn by_second(&self) -> &[i32] {
        &self.by_second
    }

    /// Minutes of the hour to expand to.
    #[must_use]
    pub fn by_minute(&self) -> &[i32] {
        &self.by_minute
    }

    /// Hours of the day to expand to.
    #[must_use]
    pub fn by_hour(&self) -> &[i32] {
        &self.by_hour
    }

    /// Weekdays to expand to, optionally with an ordinal within the month.
    #[must_use]
    pub fn by_day(&self) -> &[WeekDayNum] {
        &self.by_day
    }

    /// Days of the month to expand to, negative ones counting from its end.
    #[must_use]
    pub fn by_month_day(&self) -> &[i32] {
        &self.by_month_day
    }

    /// Months of the year to expand to.
    #[must_use]
    pub fn by_month(&self) -> &[i32] {
        &self.by_month
    }

    /// Years to expand to.
    #[must_use]
    pub fn by_year(&self) -> &[i32] {
        &self.by_year
    }

    /// Positions that were folded into one of the by-lists while parsing.
    #[must_use]
    pub fn by_set_pos(&self) -> &[i32] {
        &self.by_set_pos
    }

    /// First instant of the recurrence, in the rule's time zone.
    #[must_use]
    pub fn start(&self) -> &Zoned {
        &self.start
    }

    /// Time zone used for all local date arithmetic.
    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Instants removed from the expansion, in the rule's time zone.
    #[must_use]
    pub fn exceptions(&self) -> &[Zoned] {
        &self.exceptions
    }

    /// Everything the parser skipped.
    #[must_use]
    pub fn warnings(&self) -> &[RuleWarning] {
        &self.warnings
    }
}
