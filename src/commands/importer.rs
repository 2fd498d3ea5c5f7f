// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::legacy::LegacyDump;
use crate::session::Session;
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("legacy", sub)) => import_legacy(session, sub),
        _ => Ok(()),
    }
}

fn import_legacy(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let dump = LegacyDump::from_path(Path::new(path))
        .with_context(|| format!("Import {}", path))?;
    if !session.import_legacy(&dump, sub.get_flag("yes"))? {
        println!("Nothing changed: importing replaces ALL data, pass --yes to confirm");
        return Ok(());
    }
    println!(
        "Imported {} expenses from {}{}",
        dump.ledger.len(),
        path,
        if dump.pin.is_some() {
            "; unlock with your old PIN"
        } else {
            "; create a PIN next"
        }
    );
    Ok(())
}
