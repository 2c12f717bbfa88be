// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords of the iCalendar recurrence rule grammar (RFC 5545 Section 3.3.10).

pub const KW_RRULE_FREQ_SECONDLY: &str = "SECONDLY";
pub const KW_RRULE_FREQ_MINUTELY: &str = "MINUTELY";
pub const KW_RRULE_FREQ_HOURLY: &str = "HOURLY";
pub const KW_RRULE_FREQ_DAILY: &str = "DAILY";
pub const KW_RRULE_FREQ_WEEKLY: &str = "WEEKLY";
pub const KW_RRULE_FREQ_MONTHLY: &str = "MONTHLY";
pub const KW_RRULE_FREQ_YEARLY: &str = "YEARLY";

pub const KW_DAY_SU: &str = "SU";
pub const KW_DAY_MO: &str = "MO";
pub const KW_DAY_TU: &str = "TU";
pub const KW_DAY_WE: &str = "WE";
pub const KW_DAY_TH: &str = "TH";
pub const KW_DAY_FR: &str = "FR";
pub const KW_DAY_SA: &str = "SA";
