// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{FixedOffset, TimeZone, Utc};
use pinpurse::{
    config::Config,
    credential::GateState,
    engine::StatusLevel,
    models::{ExpenseDraft, Unit},
    period::Period,
    session::Session,
    store::LedgerStore,
};
use rust_decimal::Decimal;

fn unlocked() -> Session {
    let store = LedgerStore::open_in_memory().unwrap();
    let mut s = Session::with_store(store, Config::for_tests());
    s.create_credential("2580").unwrap();
    s
}

fn draft(name: &str, qty: &str, unit: Unit, amount: Decimal) -> ExpenseDraft {
    ExpenseDraft {
        name: name.into(),
        quantity: Some(qty.into()),
        unit,
        amount: Some(amount),
    }
}

#[test]
fn salary_and_two_purchases() {
    let mut s = unlocked();
    s.set_salary(Decimal::from(1500)).unwrap();
    s.add_expense(draft("Arroz", "5", Unit::Pounds, Decimal::from(20)))
        .unwrap();
    s.add_expense(draft("Aceite", "", Unit::UnitCount, Decimal::from(8)))
        .unwrap();

    let snap = s.snapshot().unwrap();
    assert_eq!(snap.totals.total_spent, Decimal::from(28));
    assert_eq!(snap.totals.remaining, Decimal::from(1472));
    assert_eq!(snap.totals.status, StatusLevel::Normal);
    assert_eq!(snap.ledger.len(), 2);
}

#[test]
fn total_does_not_depend_on_insertion_order() {
    let amounts = [
        Decimal::new(1999, 2),
        Decimal::from(7),
        Decimal::new(5, 1),
        Decimal::from(120),
    ];
    let mut forward = unlocked();
    let mut backward = unlocked();
    for (i, a) in amounts.iter().enumerate() {
        forward
            .add_expense(draft(&format!("f{}", i), "", Unit::Kilograms, *a))
            .unwrap();
    }
    for (i, a) in amounts.iter().rev().enumerate() {
        backward
            .add_expense(draft(&format!("b{}", i), "", Unit::Kilograms, *a))
            .unwrap();
    }
    let expected: Decimal = amounts.iter().sum();
    assert_eq!(forward.snapshot().unwrap().totals.total_spent, expected);
    assert_eq!(backward.snapshot().unwrap().totals.total_spent, expected);
}

#[test]
fn percentage_never_drops_as_spending_grows() {
    let mut s = unlocked();
    s.set_salary(Decimal::from(400)).unwrap();
    let mut last = Decimal::ZERO;
    for i in 0..12 {
        s.add_expense(draft("x", "", Unit::Liters, Decimal::from(i * 7)))
            .unwrap();
        let p = s.snapshot().unwrap().totals.percentage;
        assert!(p >= last);
        last = p;
    }
    assert_eq!(s.snapshot().unwrap().totals.status, StatusLevel::Critical);
}

#[test]
fn reset_leaves_nothing_behind() {
    let mut s = unlocked();
    s.set_salary(Decimal::from(1500)).unwrap();
    s.add_expense(draft("Arroz", "5", Unit::Pounds, Decimal::from(20)))
        .unwrap();
    assert!(s.reset_all(true).unwrap());
    assert_eq!(s.state(), GateState::Uninitialized);
    assert!(s.store().is_empty().unwrap());

    let reopened = Session::with_store(LedgerStore::open_in_memory().unwrap(), Config::for_tests());
    assert_eq!(reopened.state(), GateState::Uninitialized);
}

#[test]
fn report_narrows_to_current_week() {
    let mut s = unlocked();
    s.set_salary(Decimal::from(1000)).unwrap();
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    // Monday 2025-06-02, 10:00 local
    let now = tz.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
    let sunday = tz.with_ymd_and_hms(2025, 6, 1, 21, 0, 0).unwrap();
    let monday = tz.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();

    s.add_expense_at(
        draft("Domingo", "", Unit::UnitCount, Decimal::from(300)),
        sunday.with_timezone(&Utc),
    )
    .unwrap();
    s.add_expense_at(
        draft("Lunes", "", Unit::UnitCount, Decimal::from(40)),
        monday.with_timezone(&Utc),
    )
    .unwrap();

    let week = s.report(Period::Week, &now).unwrap();
    assert_eq!(week.records.len(), 1);
    assert_eq!(week.records[0].name, "Lunes");
    assert_eq!(week.totals.total_spent, Decimal::from(40));
    assert_eq!(week.totals.percentage, Decimal::from(4));

    let month = s.report(Period::Month, &now).unwrap();
    assert_eq!(month.records.len(), 1);

    let all = s.report(Period::AllTime, &now).unwrap();
    assert_eq!(all.records.len(), 2);
    assert_eq!(all.totals.total_spent, Decimal::from(340));
    // the ledger itself is untouched by filtering
    assert_eq!(s.snapshot().unwrap().ledger.len(), 2);
}
