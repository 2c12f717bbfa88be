// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;
use jiff::civil::Weekday;
use recur_ical::RecurrenceFrequency;

use crate::datetime::{DateArithmetic, Delta, Field};
use crate::expand::Expander;

/// By-list levels, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Level {
    Year,
    Month,
    MonthDay,
    Day,
    Hour,
    Minute,
    Second,
}

impl Level {
    const fn finer(self) -> Option<Level> {
        match self {
            Level::Year => Some(Level::Month),
            Level::Month => Some(Level::MonthDay),
            Level::MonthDay => Some(Level::Day),
            Level::Day => Some(Level::Hour),
            Level::Hour => Some(Level::Minute),
            Level::Minute => Some(Level::Second),
            Level::Second => None,
        }
    }

    /// Unit a candidate of this level is truncated to before descending.
    const fn unit(self) -> Field {
        match self {
            Level::Year => Field::Year,
            Level::Month => Field::Month,
            Level::MonthDay | Level::Day => Field::Day,
            Level::Hour => Field::Hour,
            Level::Minute => Field::Minute,
            Level::Second => Field::Second,
        }
    }
}

/// Candidates must fall within `[lower, end)`. Candidates are computed from
/// `anchor`, which carries the fields coarser levels already fixed.
#[derive(Debug, Clone)]
pub(super) struct Window {
    pub(super) anchor: Zoned,
    pub(super) lower: Zoned,
    pub(super) end: Zoned,
}

impl<A: DateArithmetic> Expander<'_, A> {
    /// Apply the by-list of `level` and everything finer within `window`,
    /// returning how many occurrences were recorded.
    pub(super) fn cascade(
        &self,
        level: Option<Level>,
        window: &Window,
        occurrences: &mut Vec<Zoned>,
    ) -> usize {
        let Some(level) = level else {
            return 0;
        };

        if self.is_unconstrained(level) {
            if self.rule.repeat().is_satisfied(occurrences) {
                return 0;
            }
            return self.cascade(level.finer(), window, occurrences);
        }

        let mut recorded = 0;
        for candidate in self.candidates(level, &window.anchor) {
            if !self.accepts(window, &candidate, occurrences) {
                if self.options.trace.detail() {
                    tracing::trace!(?level, %candidate, "candidate rejected");
                }
                continue;
            }

            let Some(lower) = self.arith.truncate(&candidate, level.unit()) else {
                continue;
            };
            let inner = Window {
                anchor: candidate,
                lower,
                end: window.end.clone(),
            };
            match self.cascade(level.finer(), &inner, occurrences) {
                0 => {
                    if self.options.trace.detail() {
                        tracing::trace!(?level, candidate = %inner.anchor, "occurrence");
                    }
                    occurrences.push(inner.anchor);
                    recorded += 1;
                }
                found => recorded += found,
            }
        }
        recorded
    }

    fn is_unconstrained(&self, level: Level) -> bool {
        let rule = self.rule;
        match level {
            Level::Year => rule.by_year().is_empty(),
            Level::Month => rule.by_month().is_empty(),
            Level::MonthDay => rule.by_month_day().is_empty(),
            Level::Day => rule.by_day().is_empty(),
            Level::Hour => rule.by_hour().is_empty(),
            Level::Minute => rule.by_minute().is_empty(),
            Level::Second => rule.by_second().is_empty(),
        }
    }

    fn accepts(&self, window: &Window, candidate: &Zoned, occurrences: &[Zoned]) -> bool {
        let at = candidate.timestamp();
        window.lower.timestamp() <= at
            && at < window.end.timestamp()
            && self.rule.start().timestamp() <= at
            && !self.rule.repeat().is_satisfied(occurrences)
    }

    /// Candidates of one level in ascending order.
    fn candidates(&self, level: Level, anchor: &Zoned) -> Vec<Zoned> {
        let rule = self.rule;
        let mut candidates = match level {
            Level::Year => self.replaced(anchor, Field::Year, rule.by_year()),
            Level::Month => self.replaced(anchor, Field::Month, rule.by_month()),
            Level::MonthDay => rule
                .by_month_day()
                .iter()
                .filter_map(|&day| self.month_day(anchor, day))
                .collect(),
            Level::Day => self.weekdays(anchor),
            Level::Hour => self.replaced(anchor, Field::Hour, rule.by_hour()),
            Level::Minute => self.replaced(anchor, Field::Minute, rule.by_minute()),
            Level::Second => self.replaced(anchor, Field::Second, rule.by_second()),
        };
        candidates.sort_by_key(Zoned::timestamp);
        candidates
    }

    fn replaced(&self, anchor: &Zoned, field: Field, values: &[i32]) -> Vec<Zoned> {
        values
            .iter()
            .filter_map(|&value| {
                let candidate = match field {
                    Field::Year | Field::Month => self.clamped(anchor, field, value),
                    _ => self.arith.with_field(anchor, field, value),
                };
                if candidate.is_none() && self.options.trace.detail() {
                    tracing::trace!(?field, value, %anchor, "candidate not representable");
                }
                candidate
            })
            .collect()
    }

    /// Replace the year or month of `anchor`, clamping its day to the length
    /// of the resulting month.
    fn clamped(&self, anchor: &Zoned, field: Field, value: i32) -> Option<Zoned> {
        let a = &self.arith;
        let first = a.with_field(anchor, Field::Day, 1)?;
        let moved = a.with_field(&first, field, value)?;
        let day = a.fields_of(anchor).day.min(a.fields_of(&moved).days_in_month);
        a.with_field(&moved, Field::Day, i32::from(day))
    }

    /// Day of the anchor's month, negative days counting from its end.
    fn month_day(&self, anchor: &Zoned, day: i32) -> Option<Zoned> {
        let days = i32::from(self.arith.fields_of(anchor).days_in_month);
        let day = if day < 0 { days + 1 + day } else { day };
        if !(1..=days).contains(&day) {
            if self.options.trace.detail() {
                tracing::trace!(day, %anchor, "month has no such day");
            }
            return None;
        }
        self.arith.with_field(anchor, Field::Day, day)
    }

    /// Days matching `BYDAY`.
    ///
    /// An ordinal entry picks that weekday of the anchor's month. A plain
    /// entry picks every such weekday of the month for monthly and yearly
    /// rules, and the one in the rest of the anchor's week otherwise.
    fn weekdays(&self, anchor: &Zoned) -> Vec<Zoned> {
        let a = &self.arith;
        let month_scoped = matches!(
            self.rule.frequency(),
            Some(RecurrenceFrequency::Monthly | RecurrenceFrequency::Yearly)
        );
        let first_of_month = if month_scoped {
            a.with_field(anchor, Field::Day, 1)
        } else {
            None
        };

        let mut days = Vec::new();
        for entry in self.rule.by_day() {
            let weekday = Weekday::from(entry.day);
            if let Some(nth) = entry.occurrence {
                match a.nth_weekday_of_month(anchor, nth, weekday) {
                    Some(day) => days.push(day),
                    None => {
                        if self.options.trace.detail() {
                            tracing::trace!(%entry, %anchor, "month has no such weekday");
                        }
                    }
                }
                continue;
            }

            if month_scoped {
                let Some(first) = &first_of_month else {
                    continue;
                };
                let fields = a.fields_of(first);
                let offset = days_between(fields.weekday, weekday).rem_euclid(7);
                let mut next = a.add(first, Delta::days(offset));
                while let Some(day) = next {
                    if a.fields_of(&day).month != fields.month {
                        break;
                    }
                    next = a.add(&day, Delta::weeks(1));
                    days.push(day);
                }
            } else {
                let offset = days_between(a.fields_of(anchor).weekday, weekday);
                if offset >= 0
                    && let Some(day) = a.add(anchor, Delta::days(offset))
                {
                    days.push(day);
                }
            }
        }
        days
    }
}

/// Signed distance from `from` to `to` within a Sunday based week.
fn days_between(from: Weekday, to: Weekday) -> i64 {
    i64::from(to.to_sunday_zero_offset()) - i64::from(from.to_sunday_zero_offset())
}
