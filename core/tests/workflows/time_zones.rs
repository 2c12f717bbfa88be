// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion in named time zones.

use jiff::tz::TimeZone;
use recur_core::{RecurrenceRule, RepeatMode};

use crate::common::{assert_days, expand, local, tz, utc};

#[test]
fn occurrences_use_rule_zone() {
    let ny = tz("America/New_York");
    // 2024-03-01 09:00 EST, a Friday
    let start = utc(2024, 3, 1, 14, 0);
    let dates = expand("FREQ=WEEKLY;BYDAY=FR;COUNT=3", &start, &[], &ny);

    assert_days(&dates, &[(2024, 3, 1), (2024, 3, 8), (2024, 3, 15)]);
    assert!(dates.iter().all(|d| d.time_zone() == &ny));
    // wall clock stays at 09:00 across the switch to EDT on 2024-03-10
    assert!(dates.iter().all(|d| d.hour() == 9));
    assert_eq!(dates.last().map(|d| d.offset().seconds()), Some(-4 * 3600));
}

#[test]
fn exceptions_match_as_instants() {
    let ny = tz("America/New_York");
    let start = local(&ny, 2024, 3, 7, 9, 0);
    let exception = utc(2024, 3, 8, 14, 0);
    let dates = expand("FREQ=DAILY;COUNT=4", &start, &[exception], &ny);

    assert_days(&dates, &[(2024, 3, 7), (2024, 3, 9), (2024, 3, 10)]);
}

#[test]
fn floating_until_is_local() {
    let ny = tz("America/New_York");
    let start = local(&ny, 2024, 3, 8, 9, 0);

    let dates = expand("FREQ=DAILY;UNTIL=20240310T090000", &start, &[], &ny);
    assert_days(&dates, &[(2024, 3, 8), (2024, 3, 9), (2024, 3, 10)]);

    // a date only limit ends at local midnight
    let dates = expand("FREQ=DAILY;UNTIL=20240310", &start, &[], &ny);
    assert_days(&dates, &[(2024, 3, 8), (2024, 3, 9)]);
}

#[test]
fn utc_until_is_converted() {
    let tokyo = tz("Asia/Tokyo");
    let start = local(&tokyo, 2024, 1, 1, 8, 0);
    let rule = RecurrenceRule::parse("FREQ=DAILY;UNTIL=20240102T230000Z", &start, &[], tokyo);

    let RepeatMode::Until(until) = rule.repeat() else {
        panic!("Expected until, got {:?}", rule.repeat());
    };
    assert_eq!((until.day(), until.hour()), (3, 8));

    let dates = rule.get_dates(None).unwrap();
    assert_days(&dates, &[(2024, 1, 1), (2024, 1, 2), (2024, 1, 3)]);
}

#[test]
fn last_day_of_month_is_local() {
    let tokyo = tz("Asia/Tokyo");
    let start = local(&tokyo, 2024, 1, 31, 0, 30);
    let dates = expand("FREQ=MONTHLY;BYMONTHDAY=-1;COUNT=3", &start, &[], &tokyo);

    assert_days(&dates, &[(2024, 1, 31), (2024, 2, 29), (2024, 3, 31)]);
    // still the previous day in UTC
    let in_utc: Vec<_> = dates
        .iter()
        .map(|d| d.with_time_zone(TimeZone::UTC).day())
        .collect();
    assert_eq!(in_utc, vec![30, 28, 30]);
}

#[test]
fn nonexistent_local_time_moves_forward() {
    let ny = tz("America/New_York");
    let start = local(&ny, 2024, 3, 9, 2, 30);
    let dates = expand("FREQ=DAILY;COUNT=3", &start, &[], &ny);

    // 02:30 does not exist on 2024-03-10
    let times: Vec<_> = dates.iter().map(|d| (d.day(), d.hour(), d.minute())).collect();
    assert_eq!(times, vec![(9, 2, 30), (10, 3, 30), (11, 2, 30)]);
}
