// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;
use crate::models::ExpenseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Week,
    Month,
    #[default]
    AllTime,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::AllTime => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" | "all-time" => Ok(Period::AllTime),
            other => Err(BudgetError::Validation(format!(
                "Unknown period '{}' (use week|month|all)",
                other
            ))),
        }
    }
}

/// Monday 00:00 of the ISO week containing `now`, in `now`'s time zone.
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let back = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(back);
    let midnight = monday.and_time(NaiveTime::MIN);
    // A DST gap at midnight has no local 00:00; fall back to the UTC reading.
    now.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| now.timezone().from_utc_datetime(&midnight))
}

/// Narrow `ledger` to the records dated inside `period` relative to `now`.
/// Order is preserved and the ledger itself is left untouched.
pub fn filter<'a, Tz: TimeZone>(
    ledger: &'a [ExpenseRecord],
    period: Period,
    now: &DateTime<Tz>,
) -> Vec<&'a ExpenseRecord> {
    match period {
        Period::AllTime => ledger.iter().collect(),
        Period::Month => {
            let tz = now.timezone();
            ledger
                .iter()
                .filter(|r| {
                    let local = r.created_at.with_timezone(&tz);
                    local.year() == now.year() && local.month() == now.month()
                })
                .collect()
        }
        Period::Week => {
            let start = start_of_week(now);
            ledger.iter().filter(|r| r.created_at >= start).collect()
        }
    }
}
