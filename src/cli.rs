// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .value_parser(["week", "month", "all"])
        .default_value("all")
        .help("Window to aggregate over")
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .action(ArgAction::SetTrue)
        .help("Confirm that all data will be erased")
}

pub fn build_cli() -> Command {
    Command::new("pinpurse")
        .version(crate_version!())
        .about("PIN-protected monthly salary and expense ledger")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("pin")
                .long("pin")
                .global(true)
                .value_name("PIN")
                .help("PIN used to unlock the ledger for this command"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the database and show its location"))
        .subcommand(
            Command::new("pin")
                .about("Manage the access PIN")
                .subcommand(
                    Command::new("create")
                        .about("Set the PIN on a fresh install")
                        .arg(Arg::new("new_pin").required(true).value_name("NEW_PIN")),
                )
                .subcommand(Command::new("check").about("Verify --pin without doing anything else"))
                .subcommand(
                    Command::new("forget")
                        .about("Forget the PIN; erases salary and expenses too")
                        .arg(yes_arg()),
                ),
        )
        .subcommand(
            Command::new("salary")
                .about("Monthly salary")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("expense")
                .about("Purchases")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("qty").long("qty").help("Quantity, informational"))
                        .arg(
                            Arg::new("unit")
                                .long("unit")
                                .default_value("pounds")
                                .help("pounds|kilograms|unit-count|liters|milliliters"),
                        ),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_args(
                    Command::new("list").arg(period_arg()).arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )),
        )
        .subcommand(json_args(
            Command::new("status")
                .about("Spent, remaining and status level")
                .arg(period_arg()),
        ))
        .subcommand(
            Command::new("export")
                .about("Write the filtered ledger and its totals to a file")
                .arg(period_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .value_parser(["csv", "json"]),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("legacy")
                        .about("Load a JSON dump of the browser version; replaces everything")
                        .arg(Arg::new("path").required(true))
                        .arg(yes_arg()),
                ),
        )
        .subcommand(
            Command::new("theme")
                .about("Show or set the display theme")
                .arg(Arg::new("value").value_parser(["light", "dark"])),
        )
        .subcommand(
            Command::new("reset")
                .about("Erase salary, expenses and PIN")
                .arg(yes_arg()),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
