// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Theme;
use crate::session::Session;
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    if let Some(v) = m.get_one::<String>("value") {
        let theme: Theme = v.parse()?;
        session.set_theme(theme)?;
        println!("Theme set to {}", theme.as_str());
    } else {
        println!("{}", session.theme().as_str());
    }
    Ok(())
}
