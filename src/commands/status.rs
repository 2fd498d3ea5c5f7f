// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::{fmt_amount, maybe_print_json, parse_period, pretty_table};
use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    super::unlock(session, m)?;
    let period = parse_period(m)?;
    let report = session.report(period, &Local::now())?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    if report.salary.is_zero() {
        println!("Salary not set; run `pinpurse salary set <AMOUNT>`");
    }
    let t = &report.totals;
    let rows = vec![
        vec!["Period".into(), period.to_string()],
        vec!["Salary".into(), fmt_amount(&report.salary)],
        vec!["Spent".into(), fmt_amount(&t.total_spent)],
        vec!["Remaining".into(), fmt_amount(&t.remaining)],
        vec!["Used".into(), format!("{}%", fmt_amount(&t.percentage))],
        vec!["Status".into(), t.status.as_str().to_string()],
        vec!["Purchases".into(), report.records.len().to_string()],
    ];
    println!("{}", pretty_table(&["", "Value"], rows));
    if t.remaining < Decimal::ZERO {
        println!("Over budget by {}", fmt_amount(&t.remaining.abs()));
    }
    Ok(())
}
