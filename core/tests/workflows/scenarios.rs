// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Documented expansion scenarios, end to end from rule text.

use jiff::tz::TimeZone;
use recur_core::{Error, Expander, RecurrenceRule, RepeatMode, RuleWarning};

use crate::common::{assert_days, expand, utc};

#[test]
fn daily_count() {
    let start = utc(2020, 1, 1, 0, 0);
    let dates = expand("FREQ=DAILY;INTERVAL=1;COUNT=5", &start, &[], &TimeZone::UTC);

    let want: Vec<_> = (1..=5).map(|day| utc(2020, 1, day, 0, 0)).collect();
    assert_eq!(dates, want);
}

#[test]
fn weekly_on_three_days() {
    // 2024-01-01 is a Monday
    let start = utc(2024, 1, 1, 10, 0);
    let dates = expand("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=6", &start, &[], &TimeZone::UTC);

    assert_days(
        &dates,
        &[
            (2024, 1, 1),
            (2024, 1, 3),
            (2024, 1, 5),
            (2024, 1, 8),
            (2024, 1, 10),
            (2024, 1, 12),
        ],
    );
}

#[test]
fn yearly_until_is_inclusive() {
    let start = utc(2020, 1, 1, 0, 0);
    let rule = RecurrenceRule::parse(
        "FREQ=YEARLY;BYMONTH=1;BYMONTHDAY=1;UNTIL=20230101T000000Z",
        &start,
        &[],
        TimeZone::UTC,
    );
    assert_eq!(rule.repeat(), &RepeatMode::Until(utc(2023, 1, 1, 0, 0)));

    let dates = rule.get_dates(None).unwrap();
    assert_days(
        &dates,
        &[(2020, 1, 1), (2021, 1, 1), (2022, 1, 1), (2023, 1, 1)],
    );
}

#[test]
fn missing_frequency_yields_start() {
    let start = utc(2024, 6, 1, 12, 0);
    let rule = RecurrenceRule::parse("INTERVAL=2;COUNT=10", &start, &[], TimeZone::UTC);

    assert_eq!(rule.warnings(), &[RuleWarning::MissingFrequency]);
    assert_eq!(rule.get_dates(None).unwrap(), vec![start]);
}

#[test]
fn unknown_frequency_yields_start() {
    let start = utc(2024, 6, 1, 12, 0);
    let dates = expand("FREQ=FORTNIGHTLY;COUNT=10", &start, &[], &TimeZone::UTC);
    assert_eq!(dates, vec![start]);
}

#[test]
fn never_ending_rule_is_reported() {
    let start = utc(2020, 1, 1, 0, 0);
    let rule = RecurrenceRule::parse("FREQ=DAILY;COUNT=20000", &start, &[], TimeZone::UTC);

    let err = rule.get_dates(None).unwrap_err();
    assert!(matches!(err, Error::InfiniteLoop { .. }));
    assert!(err.to_string().contains("infinite loop"));
}

#[test]
fn forever_rule_needs_a_bound() {
    let start = utc(2024, 1, 1, 9, 0);
    let rule = RecurrenceRule::parse("FREQ=WEEKLY;BYDAY=TU", &start, &[], TimeZone::UTC);

    let maxdate = utc(2024, 2, 1, 0, 0);
    let dates = rule.get_dates(Some(&maxdate)).unwrap();
    // the period starting 2024-02-04 is past maxdate, its Tuesday is dropped
    assert_days(
        &dates,
        &[
            (2024, 1, 2),
            (2024, 1, 9),
            (2024, 1, 16),
            (2024, 1, 23),
            (2024, 1, 30),
        ],
    );
}

#[test]
fn exceptions_are_removed_after_counting() {
    let start = utc(2024, 1, 1, 9, 0);
    let exceptions = [utc(2024, 1, 2, 9, 0), utc(2024, 1, 4, 9, 0)];
    let rule = RecurrenceRule::parse("FREQ=DAILY;COUNT=5", &start, &exceptions, TimeZone::UTC);

    let expansion = Expander::new(&rule).expand(None).unwrap();
    assert_days(
        &expansion.dates,
        &[(2024, 1, 1), (2024, 1, 3), (2024, 1, 5)],
    );
    assert_eq!(expansion.exceptions_removed, 2);
    assert_eq!(expansion.duplicates_removed, 0);
}

#[test]
fn set_position_selects_from_last_list() {
    let start = utc(2024, 1, 1, 9, 0);
    let rule = RecurrenceRule::parse(
        "FREQ=MONTHLY;BYDAY=MO;BYSETPOS=-1;COUNT=3",
        &start,
        &[],
        TimeZone::UTC,
    );
    assert_eq!(rule.by_set_pos(), &[-1]);

    let dates = rule.get_dates(None).unwrap();
    assert_days(&dates, &[(2024, 1, 29), (2024, 2, 26), (2024, 3, 25)]);
}

#[test]
fn later_limit_wins() {
    let start = utc(2024, 1, 1, 9, 0);
    let dates = expand(
        "FREQ=DAILY;UNTIL=20240103T090000Z;COUNT=5",
        &start,
        &[],
        &TimeZone::UTC,
    );
    assert_eq!(dates.len(), 5);

    let dates = expand(
        "FREQ=DAILY;COUNT=5;UNTIL=20240103T090000Z",
        &start,
        &[],
        &TimeZone::UTC,
    );
    assert_eq!(dates.len(), 3);
}

#[test]
fn skipped_parts_do_not_stop_expansion() {
    let start = utc(2024, 1, 1, 9, 0);
    let rule = RecurrenceRule::parse(
        "FREQ=DAILY;WKST=MO;BYWEEKNO=3;X-NAME=1;BYHOUR=9,25;COUNT=2",
        &start,
        &[],
        TimeZone::UTC,
    );
    assert!(rule.warnings().len() >= 3);

    let dates = rule.get_dates(None).unwrap();
    assert_eq!(dates, vec![utc(2024, 1, 1, 9, 0), utc(2024, 1, 2, 9, 0)]);
}
