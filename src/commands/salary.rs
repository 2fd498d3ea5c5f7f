// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::{fmt_amount, parse_decimal};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            super::unlock(session, sub)?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            if session.set_salary(amount)? {
                println!("Salary set to {}", fmt_amount(&amount));
            } else {
                println!("Salary must be greater than zero; unchanged");
            }
        }
        Some(("show", sub)) => {
            super::unlock(session, sub)?;
            let snap = session.snapshot()?;
            if snap.salary.is_zero() {
                println!("Salary not set; run `pinpurse salary set <AMOUNT>`");
            } else {
                println!("Salary: {}", fmt_amount(&snap.salary));
            }
        }
        _ => {}
    }
    Ok(())
}
