// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ExpenseRecord, Theme};
use crate::session::Session;
use crate::store::{Key, LedgerStore};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

fn parses_as<T: DeserializeOwned>(raw: &str) -> Option<String> {
    serde_json::from_str::<T>(raw).err().map(|e| e.to_string())
}

/// `(issue, detail)` pairs; empty when the store is healthy.
pub fn diagnose(store: &LedgerStore) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Values the normal read path would silently replace with defaults
    for key in Key::ALL {
        let Some(raw) = store.read_raw(key) else {
            continue;
        };
        let err = match key {
            Key::Salary => parses_as::<Decimal>(&raw),
            Key::Ledger => parses_as::<Vec<ExpenseRecord>>(&raw),
            Key::CredentialHash => parses_as::<serde_json::Value>(&raw),
            Key::Theme => parses_as::<Theme>(&raw),
            Key::NextId => parses_as::<i64>(&raw),
        };
        if let Some(e) = err {
            rows.push(vec![format!("corrupt_{}", key.as_str()), e]);
        }
    }

    // 2) Salary stored as a negative number
    let salary: Decimal = store.read(Key::Salary, Decimal::ZERO);
    if salary < Decimal::ZERO {
        rows.push(vec!["negative_salary".into(), salary.to_string()]);
    }
    rows
}

pub fn handle(session: &Session) -> Result<()> {
    let mut rows = diagnose(session.store());
    if session.has_legacy_pin() {
        rows.push(vec![
            "legacy_plaintext_pin".into(),
            "stored unhashed; run `pinpurse pin check --pin <PIN>` to migrate".into(),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_store_has_no_issues() {
        let store = LedgerStore::open_in_memory().unwrap();
        store.write(Key::Salary, &Decimal::from(10)).unwrap();
        store.write(Key::Theme, &Theme::Dark).unwrap();
        assert!(diagnose(&store).is_empty());
    }

    #[test]
    fn corrupt_values_are_reported() {
        let store = LedgerStore::open_in_memory().unwrap();
        store
            .connection()
            .execute_batch(
                "INSERT INTO kv(key, value) VALUES('ledger', 'nope');
                 INSERT INTO kv(key, value) VALUES('theme', '\"sepia\"');",
            )
            .unwrap();
        let issues: Vec<String> = diagnose(&store).into_iter().map(|r| r[0].clone()).collect();
        assert_eq!(issues, vec!["corrupt_ledger", "corrupt_theme"]);
    }
}
