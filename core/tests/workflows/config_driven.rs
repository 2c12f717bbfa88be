// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion driven by options loaded from TOML files.

use jiff::tz::TimeZone;
use recur_core::{Error, ExpandOptions, Expander, RecurrenceRule, TraceLevel};

use crate::common::{OptionsFile, assert_days, utc};

#[test]
fn horizon_from_file_bounds_expansion() {
    let file = OptionsFile::new("[expand]\nhorizon_year = 2022\ntrace = \"detail\"\n").unwrap();
    let options = ExpandOptions::load(Some(file.path())).unwrap();
    assert_eq!(options.trace, TraceLevel::Detail);

    let start = utc(2020, 1, 1, 0, 0);
    let rule = RecurrenceRule::parse("FREQ=YEARLY", &start, &[], TimeZone::UTC);
    let dates = Expander::new(&rule).with_options(options).get_dates(None).unwrap();
    assert_days(&dates, &[(2020, 1, 1), (2021, 1, 1), (2022, 1, 1)]);
}

#[test]
fn file_without_expand_table_uses_defaults() {
    let file = OptionsFile::new("[other]\nkey = 1\n").unwrap();
    let options = ExpandOptions::load(Some(file.path())).unwrap();
    assert_eq!(options, ExpandOptions::default());
}

#[test]
fn out_of_range_horizon_is_rejected() {
    let file = OptionsFile::new("[expand]\nhorizon_year = 12000\n").unwrap();
    let err = ExpandOptions::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, Error::InvalidOptions(_)), "got {err}");
}

#[test]
fn malformed_file_is_rejected() {
    let file = OptionsFile::new("[expand\nhorizon_year = ").unwrap();
    let err = ExpandOptions::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, Error::Toml(_)), "got {err}");
}
