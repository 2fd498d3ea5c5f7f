// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Report;
use crate::session::Session;
use crate::utils::{fmt_amount, parse_period};
use anyhow::{Context, Result, bail};
use chrono::Local;
use std::path::Path;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    super::unlock(session, m)?;
    let period = parse_period(m)?;
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();

    let report = session.report(period, &Local::now())?;
    write_report(&report, &fmt, Path::new(out))?;
    println!(
        "Exported {} expenses ({}) to {}",
        report.records.len(),
        period,
        out
    );
    Ok(())
}

pub fn write_report(report: &Report, fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record(["id", "date", "name", "quantity", "unit", "amount"])?;
            for r in &report.records {
                wtr.write_record([
                    r.id.to_string(),
                    r.created_at.with_timezone(&Local).to_rfc3339(),
                    r.name.clone(),
                    r.quantity.clone().unwrap_or_default(),
                    r.unit.to_string(),
                    fmt_amount(&r.amount),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(report)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}
