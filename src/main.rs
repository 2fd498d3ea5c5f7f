// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing::Level;

use pinpurse::{cli, commands, config::Config, db, session::Session};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));

    let mut config = Config::default();
    if let Some(p) = matches.get_one::<String>("db") {
        config = config.with_db_path(p);
    }
    let mut session = Session::open(config.clone())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(&config)?.display());
        }
        Some(("pin", sub)) => commands::pin::handle(&mut session, sub)?,
        Some(("salary", sub)) => commands::salary::handle(&mut session, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut session, sub)?,
        Some(("status", sub)) => commands::status::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut session, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut session, sub)?,
        Some(("theme", sub)) => commands::theme::handle(&mut session, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&mut session, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&session)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
