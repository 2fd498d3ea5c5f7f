// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ExpenseDraft, ExpenseRecord, Unit};
use crate::session::Session;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, parse_period, pretty_table};
use anyhow::{Result, bail};
use chrono::Local;
use serde::Serialize;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    super::unlock(session, sub)?;
    if session.snapshot()?.salary.is_zero() {
        bail!("Set a salary first: `pinpurse salary set <AMOUNT>`");
    }
    let name = sub.get_one::<String>("name").unwrap().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let quantity = sub
        .get_one::<String>("qty")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| parse_decimal(s).map(|_| s.to_string()))
        .transpose()?;
    let unit: Unit = sub.get_one::<String>("unit").unwrap().parse()?;

    let draft = ExpenseDraft {
        name,
        quantity,
        unit,
        amount: Some(amount),
    };
    match session.add_expense(draft)? {
        Some(rec) => println!(
            "Recorded #{} '{}' for {}",
            rec.id,
            rec.name,
            fmt_amount(&rec.amount)
        ),
        None => println!("Expense needs a name and an amount; nothing recorded"),
    }
    Ok(())
}

fn rm(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    super::unlock(session, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if session.remove_expense(id)? {
        println!("Removed expense #{}", id);
    } else {
        println!("No expense #{}", id);
    }
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    super::unlock(session, sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.name.clone(),
                    r.quantity.clone(),
                    r.unit.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Name", "Qty", "Unit", "Amount"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub amount: String,
}

impl From<&ExpenseRecord> for ExpenseRow {
    fn from(r: &ExpenseRecord) -> Self {
        ExpenseRow {
            id: r.id,
            date: r
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            name: r.name.clone(),
            quantity: r.quantity.clone().unwrap_or_default(),
            unit: r.unit.to_string(),
            amount: fmt_amount(&r.amount),
        }
    }
}

/// Ledger rows for the requested period, newest first.
pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let period = parse_period(sub)?;
    let report = session.report(period, &Local::now())?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(report
        .records
        .iter()
        .take(limit)
        .map(ExpenseRow::from)
        .collect())
}
