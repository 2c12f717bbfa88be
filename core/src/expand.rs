// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The expansion engine.
//!
//! Expansion walks the rule period by period. Each period is a window of
//! time around a cursor, and the by-lists of the rule are applied to that
//! window from the coarsest (year) to the finest (second) unit. A period
//! that none of the by-lists matched contributes its cursor.

mod cascade;

use jiff::Zoned;
use recur_ical::RecurrenceFrequency;

use crate::Error;
use crate::config::ExpandOptions;
use crate::datetime::{DateArithmetic, DateFields, Delta, Field, ZonedArithmetic};
use crate::postprocess;
use crate::rule::RecurrenceRule;

use self::cascade::{Level, Window};

/// Occurrences of an expansion, with what post-processing removed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Occurrences in ascending order, in the rule's time zone
    pub dates: Vec<Zoned>,
    /// Number of repeated instants dropped
    pub duplicates_removed: usize,
    /// Number of occurrences dropped because they were exceptions
    pub exceptions_removed: usize,
}

/// Expands a [`RecurrenceRule`] with chosen options and date arithmetic.
///
/// ```
/// use jiff::civil::date;
/// use jiff::tz::TimeZone;
/// use recur_core::{ExpandOptions, Expander, RecurrenceRule, TraceLevel};
///
/// let start = date(2024, 1, 1).at(9, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
/// let rule = RecurrenceRule::parse("FREQ=DAILY;COUNT=3", &start, &[], TimeZone::UTC);
/// let options = ExpandOptions { trace: TraceLevel::Summary, ..Default::default() };
///
/// let dates = Expander::new(&rule).with_options(options).get_dates(None).unwrap();
/// assert_eq!(dates.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Expander<'r, A = ZonedArithmetic> {
    rule: &'r RecurrenceRule,
    arith: A,
    options: ExpandOptions,
}

impl<'r> Expander<'r> {
    /// Expander with default options and jiff backed arithmetic.
    #[must_use]
    pub fn new(rule: &'r RecurrenceRule) -> Self {
        Self {
            rule,
            arith: ZonedArithmetic,
            options: ExpandOptions::default(),
        }
    }
}

impl<'r, A: DateArithmetic> Expander<'r, A> {
    /// Use other options for this expansion.
    #[must_use]
    pub fn with_options(self, options: ExpandOptions) -> Self {
        Self { options, ..self }
    }

    /// Use other date arithmetic for this expansion.
    #[must_use]
    pub fn with_arithmetic<B: DateArithmetic>(self, arith: B) -> Expander<'r, B> {
        Expander {
            rule: self.rule,
            arith,
            options: self.options,
        }
    }

    /// Expand the rule into its occurrences.
    ///
    /// # Errors
    ///
    /// See [`Expander::expand`].
    pub fn get_dates(&self, maxdate: Option<&Zoned>) -> Result<Vec<Zoned>, Error> {
        self.expand(maxdate).map(|expansion| expansion.dates)
    }

    /// Expand the rule into its occurrences, reporting what post-processing
    /// removed.
    ///
    /// When `maxdate` is given, expansion stops at the first period whose
    /// cursor lies after it, and the last occurrence generated is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] for an out of range horizon, and
    /// [`Error::InfiniteLoop`] when the rule runs more passes than the
    /// horizon year without stopping.
    #[tracing::instrument(skip_all)]
    pub fn expand(&self, maxdate: Option<&Zoned>) -> Result<Expansion, Error> {
        let mut options = self.options;
        options.normalize()?;

        if options.trace.summary() {
            tracing::debug!(
                frequency = ?self.rule.frequency(),
                interval = self.rule.interval(),
                repeat = ?self.rule.repeat(),
                start = %self.rule.start(),
                maxdate = ?maxdate.map(ToString::to_string),
                horizon_year = options.horizon_year,
                "expanding recurrence rule"
            );
        }

        let generated = self.generate(&options, maxdate)?;
        let expansion = postprocess::finish(generated, self.rule, options.trace);

        if options.trace.summary() {
            tracing::debug!(
                occurrences = expansion.dates.len(),
                duplicates_removed = expansion.duplicates_removed,
                exceptions_removed = expansion.exceptions_removed,
                "expansion finished"
            );
        }
        Ok(expansion)
    }

    /// The period loop, producing occurrences before post-processing.
    fn generate(&self, options: &ExpandOptions, maxdate: Option<&Zoned>) -> Result<Vec<Zoned>, Error> {
        let rule = self.rule;
        let trace = options.trace;
        let max_passes = usize::from(options.horizon_year.unsigned_abs());

        let mut occurrences = Vec::new();
        let mut pass = 0;
        loop {
            let Some(window) = self.period(pass) else {
                if trace.summary() {
                    tracing::debug!(pass, "next period is not representable, stopping");
                }
                break;
            };
            let cursor = &window.anchor;

            if self.arith.fields_of(cursor).year > options.horizon_year {
                if trace.summary() {
                    tracing::debug!(pass, %cursor, "cursor passed the horizon year, stopping");
                }
                break;
            }
            if trace.detail() {
                tracing::trace!(pass, %cursor, lower = %window.lower, end = %window.end, "period");
            }

            let recorded = self.cascade(Some(Level::Year), &window, &mut occurrences);

            if let Some(maxdate) = maxdate
                && cursor.timestamp() > maxdate.timestamp()
            {
                let dropped = occurrences.pop();
                if trace.summary() {
                    tracing::debug!(
                        pass,
                        %cursor,
                        dropped = ?dropped.map(|d| d.to_string()),
                        "cursor passed maxdate, stopping"
                    );
                }
                break;
            }

            if recorded == 0 && !rule.repeat().is_satisfied(&occurrences) {
                let occurrence = if cursor.timestamp() < rule.start().timestamp() {
                    rule.start().clone()
                } else {
                    cursor.clone()
                };
                if trace.detail() {
                    tracing::trace!(pass, %occurrence, "no by-list matched, recording the cursor");
                }
                occurrences.push(occurrence);
            }

            if rule.repeat().is_satisfied(&occurrences) {
                if trace.summary() {
                    tracing::debug!(pass, occurrences = occurrences.len(), "repeat limit reached, stopping");
                }
                break;
            }
            if rule.frequency().is_none() {
                break;
            }

            pass += 1;
            if pass > max_passes {
                if trace.summary() {
                    tracing::debug!(pass, occurrences = occurrences.len(), "pass budget exhausted");
                }
                return Err(Error::InfiniteLoop { passes: pass });
            }
        }
        Ok(occurrences)
    }

    /// The window of the `pass`-th period, anchored at its cursor.
    fn period(&self, pass: usize) -> Option<Window> {
        let rule = self.rule;
        let a = &self.arith;
        let start = rule.start();

        let Some(frequency) = rule.frequency() else {
            // a rule without frequency has a single empty period
            return (pass == 0).then(|| Window {
                anchor: start.clone(),
                lower: start.clone(),
                end: start.clone(),
            });
        };

        let steps = i64::try_from(pass)
            .ok()?
            .checked_mul(i64::from(rule.interval()))?;
        let has_by_day = !rule.by_day().is_empty();

        let (cursor, lower, end) = match frequency {
            RecurrenceFrequency::Yearly => {
                let mut cursor = a.add(start, Delta::years(steps))?;
                if pass > 0 && has_by_day {
                    cursor = a.with_field(&cursor, Field::Day, 1)?;
                }
                let lower = a.truncate(&cursor, Field::Year)?;
                let end = a.add(&lower, Delta::years(1))?;
                (cursor, lower, end)
            }
            RecurrenceFrequency::Monthly => {
                let mut cursor = self.add_months(start, steps)?;
                if has_by_day || !rule.by_month_day().is_empty() {
                    cursor = a.with_field(&cursor, Field::Day, 1)?;
                }
                let lower = a.truncate(&cursor, Field::Month)?;
                let end = a.add(&lower, Delta::months(1))?;
                (cursor, lower, end)
            }
            RecurrenceFrequency::Weekly => {
                let mut cursor = a.add(start, Delta::weeks(steps))?;
                if pass > 0 && has_by_day {
                    let since_sunday = a.fields_of(&cursor).weekday.to_sunday_zero_offset();
                    cursor = a.add(&cursor, Delta::days(-i64::from(since_sunday)))?;
                }
                let end = a.add(&cursor, Delta::weeks(i64::from(rule.interval())))?;
                (cursor.clone(), cursor, end)
            }
            RecurrenceFrequency::Daily => {
                let cursor = a.add(start, Delta::days(steps))?;
                let lower = a.truncate(&cursor, Field::Day)?;
                let end = a.add(&lower, Delta::days(1))?;
                (cursor, lower, end)
            }
            RecurrenceFrequency::Hourly => {
                let cursor = a.add(start, Delta::hours(steps))?;
                let lower = a.truncate(&cursor, Field::Hour)?;
                let end = a.add(&lower, Delta::hours(1))?;
                (cursor, lower, end)
            }
            RecurrenceFrequency::Minutely => {
                let cursor = a.add(start, Delta::minutes(steps))?;
                let lower = a.truncate(&cursor, Field::Minute)?;
                let end = a.add(&lower, Delta::minutes(1))?;
                (cursor, lower, end)
            }
            RecurrenceFrequency::Secondly => {
                let cursor = a.add(start, Delta::seconds(steps))?;
                let lower = a.truncate(&cursor, Field::Second)?;
                let end = a.add(&lower, Delta::seconds(1))?;
                (cursor, lower, end)
            }
        };

        Some(Window {
            anchor: cursor,
            lower,
            end,
        })
    }

    /// Add months, pulling back to the end of the intended month when the
    /// arithmetic overflowed into the one after it.
    fn add_months(&self, from: &Zoned, months: i64) -> Option<Zoned> {
        let a = &self.arith;
        let next = a.add(from, Delta::months(months))?;
        let before = a.fields_of(from);
        let after = a.fields_of(&next);
        if month_index(&after) > month_index(&before).checked_add(months)? {
            if self.options.trace.detail() {
                tracing::trace!(%from, %next, months, "month addition overflowed, pulling back");
            }
            return a.add(&next, Delta::days(-i64::from(after.day)));
        }
        Some(next)
    }
}

fn month_index(fields: &DateFields) -> i64 {
    i64::from(fields.year) * 12 + i64::from(fields.month) - 1
}
