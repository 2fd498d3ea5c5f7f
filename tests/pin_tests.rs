// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pinpurse::{
    cli,
    commands::{pin, salary, status},
    config::Config,
    credential::GateState,
    session::Session,
    store::LedgerStore,
};

fn session() -> Session {
    Session::with_store(LedgerStore::open_in_memory().unwrap(), Config::for_tests())
}

fn run(session: &mut Session, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pinpurse"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("pin", m)) => pin::handle(session, m),
        Some(("salary", m)) => salary::handle(session, m),
        Some(("status", m)) => status::handle(session, m),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn create_then_relock_then_unlock_with_pin_flag() {
    let mut s = session();
    run(&mut s, &["pin", "create", "4455"]).unwrap();
    assert_eq!(s.state(), GateState::Unlocked);
    run(&mut s, &["salary", "set", "1500"]).unwrap();

    s.lock();
    let err = run(&mut s, &["status"]).unwrap_err();
    assert!(err.to_string().contains("--pin"));

    run(&mut s, &["status", "--pin", "4455"]).unwrap();
    assert_eq!(s.state(), GateState::Unlocked);
}

#[test]
fn wrong_pin_is_rejected_and_flagged() {
    let mut s = session();
    run(&mut s, &["pin", "create", "4455"]).unwrap();
    s.lock();
    let err = run(&mut s, &["pin", "check", "--pin", "5544"]).unwrap_err();
    assert!(err.to_string().contains("Incorrect PIN"));
    assert_eq!(s.state(), GateState::Locked);
    assert!(s.pin_error());
}

#[test]
fn short_pin_is_a_validation_error() {
    let mut s = session();
    let err = run(&mut s, &["pin", "create", "12"]).unwrap_err();
    assert!(err.to_string().contains("at least 4 digits"));
    assert_eq!(s.state(), GateState::Uninitialized);
}

#[test]
fn commands_before_pin_creation_point_to_pin_create() {
    let mut s = session();
    let err = run(&mut s, &["salary", "show"]).unwrap_err();
    assert!(err.to_string().contains("pin create"));
}

#[test]
fn forget_without_yes_keeps_everything() {
    let mut s = session();
    run(&mut s, &["pin", "create", "4455"]).unwrap();
    run(&mut s, &["salary", "set", "900"]).unwrap();
    s.lock();

    run(&mut s, &["pin", "forget"]).unwrap();
    assert_eq!(s.state(), GateState::Locked);
    assert!(!s.store().is_empty().unwrap());

    run(&mut s, &["pin", "forget", "--yes"]).unwrap();
    assert_eq!(s.state(), GateState::Uninitialized);
    assert!(s.store().is_empty().unwrap());
}
