// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod pin;
pub mod salary;
pub mod expenses;
pub mod status;
pub mod exporter;
pub mod importer;
pub mod theme;
pub mod reset;
pub mod doctor;

use anyhow::{Result, bail};

use crate::credential::GateState;
use crate::session::Session;

/// Unlock `session` with the global `--pin`, or fail with a hint.
pub fn unlock(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    if session.state() == GateState::Unlocked {
        return Ok(());
    }
    if session.state() == GateState::Uninitialized {
        bail!("No PIN yet; run `pinpurse pin create <NEW_PIN>` first");
    }
    let Some(pin) = m.get_one::<String>("pin") else {
        bail!("Ledger is locked; pass --pin");
    };
    session.verify(pin)?;
    Ok(())
}
