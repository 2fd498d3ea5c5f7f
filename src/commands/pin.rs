// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::session::Session;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => {
            let pin = sub.get_one::<String>("new_pin").unwrap();
            session.create_credential(pin)?;
            println!("PIN saved; ledger unlocked");
        }
        Some(("check", sub)) => {
            super::unlock(session, sub)?;
            if session.has_legacy_pin() {
                println!("PIN OK (legacy PIN kept)");
            } else {
                println!("PIN OK");
            }
        }
        Some(("forget", sub)) => {
            if session.forget_credential(sub.get_flag("yes"))? {
                println!("PIN forgotten; all data erased");
            } else {
                println!("Nothing changed: forgetting the PIN erases ALL data, pass --yes to confirm");
            }
        }
        _ => {}
    }
    Ok(())
}
