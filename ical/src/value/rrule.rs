// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule type definitions and the permissive `RRULE` parser.

use std::fmt::{self, Display};

use chumsky::extra::ParserExtra;
use chumsky::input::{Input, Stream};
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY,
};
use crate::value::datetime::{ValueDateTime, parse_date_time};
use crate::value::join_errors;
use crate::value::miscellaneous::u8_0_9;
use crate::value::numeric::{is_positive, parse_integer};

/// Recurrence rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRecurrenceRule {
    /// Frequency of recurrence, `None` when the rule has no usable FREQ
    pub freq: Option<RecurrenceFrequency>,
    /// Interval between recurrences, at least 1
    pub interval: u32,
    /// How the recurrence ends
    pub limit: RepeatLimit,
    /// Second specifier
    pub by_second: Vec<i32>,
    /// Minute specifier
    pub by_minute: Vec<i32>,
    /// Hour specifier
    pub by_hour: Vec<i32>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Day of month specifier
    pub by_month_day: Vec<i32>,
    /// Month specifier
    pub by_month: Vec<i32>,
    /// Year specifier
    pub by_year: Vec<i32>,
    /// Position specifier, applied to the list named by [`Self::set_pos_target`]
    pub by_set_pos: Vec<i32>,
    /// The by-list that `BYSETPOS` was applied to
    pub set_pos_target: Option<RuleKey>,
}

impl Default for ValueRecurrenceRule {
    fn default() -> Self {
        Self {
            freq: None,
            interval: 1,
            limit: RepeatLimit::Forever,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_month: Vec::new(),
            by_year: Vec::new(),
            by_set_pos: Vec::new(),
            set_pos_target: None,
        }
    }
}

/// How a recurrence ends. When a rule names both `COUNT` and `UNTIL`, the
/// one written last wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatLimit {
    /// Stop after this many occurrences
    Count(u32),
    /// Stop after this date or date-time
    Until(ValueDateTime),
    /// No limit in the rule itself
    #[default]
    Forever,
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceFrequency::Secondly => write!(f, "{KW_RRULE_FREQ_SECONDLY}"),
            RecurrenceFrequency::Minutely => write!(f, "{KW_RRULE_FREQ_MINUTELY}"),
            RecurrenceFrequency::Hourly => write!(f, "{KW_RRULE_FREQ_HOURLY}"),
            RecurrenceFrequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            RecurrenceFrequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            RecurrenceFrequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            RecurrenceFrequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Occurrence in month, negative counts from the end (optional)
    pub occurrence: Option<i32>,
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.occurrence {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.day)
    }
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekDay::Sunday => write!(f, "{KW_DAY_SU}"),
            WeekDay::Monday => write!(f, "{KW_DAY_MO}"),
            WeekDay::Tuesday => write!(f, "{KW_DAY_TU}"),
            WeekDay::Wednesday => write!(f, "{KW_DAY_WE}"),
            WeekDay::Thursday => write!(f, "{KW_DAY_TH}"),
            WeekDay::Friday => write!(f, "{KW_DAY_FR}"),
            WeekDay::Saturday => write!(f, "{KW_DAY_SA}"),
        }
    }
}

impl From<WeekDay> for jiff::civil::Weekday {
    fn from(value: WeekDay) -> Self {
        match value {
            WeekDay::Sunday => Self::Sunday,
            WeekDay::Monday => Self::Monday,
            WeekDay::Tuesday => Self::Tuesday,
            WeekDay::Wednesday => Self::Wednesday,
            WeekDay::Thursday => Self::Thursday,
            WeekDay::Friday => Self::Friday,
            WeekDay::Saturday => Self::Saturday,
        }
    }
}

impl From<jiff::civil::Weekday> for WeekDay {
    fn from(value: jiff::civil::Weekday) -> Self {
        match value {
            jiff::civil::Weekday::Sunday => Self::Sunday,
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
        }
    }
}

/// Names of the rule parts the parser knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum RuleKey {
    Freq,
    Interval,
    Count,
    Until,
    BySecond,
    ByMinute,
    ByHour,
    ByDay,
    ByMonthDay,
    ByMonth,
    ByYear,
    BySetPos,
    ByWeekNo,
    ByYearDay,
    Wkst,
}

/// Problems found while parsing a rule. None of them abort the parse; the
/// offending part or entry is skipped.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleWarning {
    /// A segment without `=`
    #[error("rule part `{part}` is not of the form KEY=VALUE")]
    MalformedPart {
        /// The segment as written
        part: String,
    },

    /// A key the parser does not know
    #[error("unknown rule part `{key}`")]
    UnknownPart {
        /// The key as written
        key: String,
    },

    /// A known key whose semantics are not supported
    #[error("rule part `{key}` is not supported and was ignored")]
    UnsupportedPart {
        /// The ignored key
        key: RuleKey,
    },

    /// A FREQ value that is not one of the seven frequencies
    #[error("unknown frequency `{value}`")]
    UnknownFrequency {
        /// The value as written
        value: String,
    },

    /// A value or list entry that could not be parsed
    #[error("invalid {key} value `{value}`: {reason}")]
    InvalidValue {
        /// The rule part the value belongs to
        key: RuleKey,
        /// The value as written, or as composed by BYSETPOS
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// BYSETPOS without an earlier by-list to rewrite
    #[error("BYSETPOS has no preceding by-list to apply to")]
    DanglingSetPos,

    /// The rule has no usable FREQ
    #[error("rule has no FREQ, it expands to its start only")]
    MissingFrequency,
}

/// Parses an `RRULE` value such as `FREQ=MONTHLY;BYDAY=-1FR;COUNT=3`.
///
/// Parsing never fails. Every problem is reported as a [`RuleWarning`] and
/// the rest of the rule is kept.
///
/// When `BYSETPOS` is present, the by-list declared most recently before the
/// end of the rule is replaced by the concatenation of every position with
/// every entry, e.g. `BYDAY=MO,TU;BYSETPOS=-1` becomes `BYDAY=-1MO,-1TU`.
/// Only that single list is rewritten.
#[must_use]
pub fn parse_rrule(src: &str) -> (ValueRecurrenceRule, Vec<RuleWarning>) {
    let mut builder = RuleBuilder::default();
    for part in src.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        builder.part(part);
    }
    builder.finish()
}

#[derive(Debug, Default)]
struct RuleBuilder {
    rule: ValueRecurrenceRule,
    warnings: Vec<RuleWarning>,
    last_list: Option<RuleKey>,
}

impl RuleBuilder {
    fn part(&mut self, part: &str) {
        let Some((key, value)) = part.split_once('=') else {
            self.warnings.push(RuleWarning::MalformedPart {
                part: part.to_owned(),
            });
            return;
        };

        let (key, value) = (key.trim(), value.trim());
        let Ok(key) = key.parse::<RuleKey>() else {
            self.warnings.push(RuleWarning::UnknownPart {
                key: key.to_owned(),
            });
            return;
        };

        match key {
            RuleKey::Freq => match parse_frequency(value) {
                Ok(freq) => self.rule.freq = Some(freq),
                Err(_) => self.warnings.push(RuleWarning::UnknownFrequency {
                    value: value.to_owned(),
                }),
            },
            RuleKey::Interval => match parse_integer(value).map(u32::try_from) {
                Ok(Ok(n)) if n > 0 => self.rule.interval = n,
                Ok(_) => self.invalid(key, value, "interval must be positive".to_owned()),
                Err(reason) => self.invalid(key, value, reason),
            },
            RuleKey::Count => match parse_integer(value).map(u32::try_from) {
                Ok(Ok(n)) => self.rule.limit = RepeatLimit::Count(n),
                Ok(Err(_)) => self.invalid(key, value, "count must not be negative".to_owned()),
                Err(reason) => self.invalid(key, value, reason),
            },
            RuleKey::Until => match parse_date_time(value) {
                Ok(until) => self.rule.limit = RepeatLimit::Until(until),
                Err(reason) => self.invalid(key, value, reason),
            },
            RuleKey::BySetPos => {
                let positions = self.entries(key, value, parse_integer);
                let mut kept = Vec::with_capacity(positions.len());
                for p in positions {
                    if p == 0 {
                        self.invalid(key, "0", "position must not be zero".to_owned());
                    } else {
                        kept.push(p);
                    }
                }
                self.rule.by_set_pos = kept;
            }
            RuleKey::ByDay => {
                self.rule.by_day = self.entries(key, value, parse_weekdaynum);
                self.last_list = Some(key);
            }
            RuleKey::BySecond
            | RuleKey::ByMinute
            | RuleKey::ByHour
            | RuleKey::ByMonthDay
            | RuleKey::ByMonth
            | RuleKey::ByYear => {
                let list = self.entries(key, value, parse_integer);
                if let Some(slot) = self.integer_list(key) {
                    *slot = list;
                }
                self.last_list = Some(key);
            }
            RuleKey::ByWeekNo | RuleKey::ByYearDay | RuleKey::Wkst => {
                self.warnings.push(RuleWarning::UnsupportedPart { key });
            }
        }
    }

    fn finish(mut self) -> (ValueRecurrenceRule, Vec<RuleWarning>) {
        if !self.rule.by_set_pos.is_empty() {
            match self.last_list {
                Some(RuleKey::ByDay) => {
                    let days = std::mem::take(&mut self.rule.by_day);
                    self.rule.by_day = self.compose(RuleKey::ByDay, &days, parse_weekdaynum);
                }
                Some(key) => {
                    let list = self.integer_list(key).map(std::mem::take).unwrap_or_default();
                    let composed = self.compose(key, &list, parse_integer);
                    if let Some(slot) = self.integer_list(key) {
                        *slot = composed;
                    }
                }
                None => self.warnings.push(RuleWarning::DanglingSetPos),
            }
            self.rule.set_pos_target = self.last_list;
        }

        if self.rule.freq.is_none() {
            self.warnings.push(RuleWarning::MissingFrequency);
        }

        (self.rule, self.warnings)
    }

    /// Parses a comma separated list, dropping entries that do not parse.
    fn entries<T>(
        &mut self,
        key: RuleKey,
        value: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Vec<T> {
        let mut list = Vec::new();
        for entry in value.split(',').map(str::trim) {
            match parse(entry) {
                Ok(v) => list.push(v),
                Err(reason) => self.invalid(key, entry, reason),
            }
        }
        list
    }

    /// Prefixes every entry with every set position and parses the result
    /// again with the entry grammar.
    fn compose<T: Display>(
        &mut self,
        key: RuleKey,
        entries: &[T],
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Vec<T> {
        let positions = self.rule.by_set_pos.clone();
        let mut list = Vec::with_capacity(positions.len() * entries.len());
        for p in positions {
            for v in entries {
                let composed = format!("{p}{v}");
                match parse(&composed) {
                    Ok(v) => list.push(v),
                    Err(reason) => self.invalid(key, &composed, reason),
                }
            }
        }
        list
    }

    fn integer_list(&mut self, key: RuleKey) -> Option<&mut Vec<i32>> {
        match key {
            RuleKey::BySecond => Some(&mut self.rule.by_second),
            RuleKey::ByMinute => Some(&mut self.rule.by_minute),
            RuleKey::ByHour => Some(&mut self.rule.by_hour),
            RuleKey::ByMonthDay => Some(&mut self.rule.by_month_day),
            RuleKey::ByMonth => Some(&mut self.rule.by_month),
            RuleKey::ByYear => Some(&mut self.rule.by_year),
            _ => None,
        }
    }

    fn invalid(&mut self, key: RuleKey, value: &str, reason: String) {
        self.warnings.push(RuleWarning::InvalidValue {
            key,
            value: value.to_owned(),
            reason,
        });
    }
}

fn parse_frequency(src: &str) -> Result<RecurrenceFrequency, String> {
    let src = src.to_ascii_uppercase();
    freq::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| join_errors(&errs))
}

fn parse_weekdaynum(src: &str) -> Result<WeekDayNum, String> {
    let src = src.to_ascii_uppercase();
    weekdaynum::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| join_errors(&errs))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src, I, E>() -> impl Parser<'src, I, RecurrenceFrequency, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_RRULE_FREQ_SECONDLY).to(RecurrenceFrequency::Secondly),
        just(KW_RRULE_FREQ_MINUTELY).to(RecurrenceFrequency::Minutely),
        just(KW_RRULE_FREQ_HOURLY).to(RecurrenceFrequency::Hourly),
        just(KW_RRULE_FREQ_DAILY).to(RecurrenceFrequency::Daily),
        just(KW_RRULE_FREQ_WEEKLY).to(RecurrenceFrequency::Weekly),
        just(KW_RRULE_FREQ_MONTHLY).to(RecurrenceFrequency::Monthly),
        just(KW_RRULE_FREQ_YEARLY).to(RecurrenceFrequency::Yearly),
    ))
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDayNum, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordwk())
        .map(|(positive, n)| if positive { n } else { -n })
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
}

fn ordwk<'src, I, E>() -> impl Parser<'src, I, i32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    u8_0_9()
        .then(u8_0_9().or_not())
        .map(|(a, b)| match b {
            Some(b) => i32::from(10 * a + b),
            None => i32::from(a),
        })
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, WeekDay, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_DAY_SU).to(WeekDay::Sunday),
        just(KW_DAY_MO).to(WeekDay::Monday),
        just(KW_DAY_TU).to(WeekDay::Tuesday),
        just(KW_DAY_WE).to(WeekDay::Wednesday),
        just(KW_DAY_TH).to(WeekDay::Thursday),
        just(KW_DAY_FR).to(WeekDay::Friday),
        just(KW_DAY_SA).to(WeekDay::Saturday),
    ))
}
