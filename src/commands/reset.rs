// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    super::unlock(session, m)?;
    if session.reset_all(m.get_flag("yes"))? {
        println!("All data erased; create a new PIN to start over");
    } else {
        println!("Nothing changed: reset erases salary, expenses and PIN, pass --yes to confirm");
    }
    Ok(())
}
