// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Guarantees every expansion keeps, checked over a spread of rules.

use jiff::Zoned;
use jiff::tz::TimeZone;
use recur_core::{RecurrenceRule, RepeatMode};

use crate::common::{assert_excludes, assert_sorted_unique, assert_within, local, tz, utc};

const RULES: &[&str] = &[
    "FREQ=DAILY;COUNT=30",
    "FREQ=DAILY;INTERVAL=3;COUNT=30",
    "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=20",
    "FREQ=WEEKLY;INTERVAL=3;BYDAY=SU,SA;COUNT=10",
    "FREQ=MONTHLY;BYMONTHDAY=1,15,-1;COUNT=24",
    "FREQ=MONTHLY;BYDAY=1MO,-1FR;COUNT=12",
    "FREQ=MONTHLY;BYDAY=MO,FR;BYHOUR=9,18;COUNT=30",
    "FREQ=YEARLY;BYMONTH=3,10;BYDAY=-1SU;COUNT=6",
    "FREQ=YEARLY;BYMONTH=2,8;BYMONTHDAY=29;COUNT=6",
    "FREQ=HOURLY;INTERVAL=5;BYMINUTE=0,30;COUNT=40",
    "FREQ=MINUTELY;INTERVAL=90;COUNT=20",
    "FREQ=SECONDLY;INTERVAL=3600;BYSECOND=0,30;COUNT=10",
    "FREQ=DAILY;BYHOUR=8,20;BYMINUTE=0;UNTIL=20240701T000000Z",
    "FREQ=WEEKLY;BYDAY=TU,TH;UNTIL=20240701T000000Z",
];

fn starts() -> Vec<Zoned> {
    vec![
        utc(2024, 1, 1, 9, 0),
        utc(2024, 1, 31, 23, 30),
        local(&tz("America/New_York"), 2024, 3, 9, 2, 30),
        local(&tz("Australia/Lord_Howe"), 2024, 4, 6, 1, 45),
    ]
}

fn check(text: &str, start: &Zoned, exceptions: &[Zoned]) {
    let rule = RecurrenceRule::parse(text, start, exceptions, start.time_zone().clone());
    let dates = rule
        .get_dates(None)
        .unwrap_or_else(|e| panic!("expanding {text} from {start} failed: {e}"));

    if exceptions.is_empty() {
        assert!(!dates.is_empty(), "{text} from {start} expanded to nothing");
    }
    assert_sorted_unique(&dates);
    assert_excludes(&dates, exceptions);
    match rule.repeat() {
        RepeatMode::Count(count) => {
            let count = usize::try_from(*count).unwrap();
            assert!(dates.len() <= count, "{text} produced {} dates", dates.len());
        }
        RepeatMode::Until(until) => assert_within(&dates, start, Some(until)),
        RepeatMode::Forever => {}
    }
    assert_within(&dates, start, None);
}

#[test]
fn occurrences_are_ascending_and_after_start() {
    for start in starts() {
        for text in RULES {
            check(text, &start, &[]);
        }
    }
}

#[test]
fn exceptions_never_survive() {
    for start in starts() {
        for text in RULES {
            let rule = RecurrenceRule::parse(text, &start, &[], start.time_zone().clone());
            let dates = rule.get_dates(None).unwrap();
            // every other occurrence, given in UTC
            let exceptions: Vec<_> = dates
                .iter()
                .step_by(2)
                .map(|d| d.with_time_zone(TimeZone::UTC))
                .collect();
            check(text, &start, &exceptions);

            let rule = RecurrenceRule::parse(text, &start, &exceptions, start.time_zone().clone());
            let remaining = rule.get_dates(None).unwrap();
            assert_eq!(remaining.len(), dates.len() - exceptions.len());
        }
    }
}

#[test]
fn count_is_reached_without_exceptions() {
    let start = utc(2024, 1, 1, 9, 0);
    for text in ["FREQ=DAILY;COUNT=30", "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=20"] {
        let rule = RecurrenceRule::parse(text, &start, &[], TimeZone::UTC);
        let RepeatMode::Count(count) = rule.repeat() else {
            panic!("Expected count mode for {text}");
        };
        let dates = rule.get_dates(None).unwrap();
        assert_eq!(dates.len(), usize::try_from(*count).unwrap());
    }
}
