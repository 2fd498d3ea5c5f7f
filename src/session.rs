// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::Config;
use crate::credential::{CredentialGate, GateState};
use crate::engine::{BudgetEngine, Report, Snapshot, Totals};
use crate::error::{BudgetError, Result};
use crate::legacy::LegacyDump;
use crate::models::{ExpenseDraft, ExpenseRecord, Theme};
use crate::period::{self, Period};
use crate::store::{Key, LedgerStore};

/// One user session: the store plus the gate and engine working copies.
///
/// Ledger operations and snapshots are refused with `BudgetError::Locked`
/// until the gate is unlocked.
pub struct Session {
    store: LedgerStore,
    config: Config,
    gate: CredentialGate,
    engine: BudgetEngine,
}

impl Session {
    pub fn open(config: Config) -> anyhow::Result<Self> {
        let store = LedgerStore::open(&config)?;
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: LedgerStore, config: Config) -> Self {
        let gate = CredentialGate::load(&store, &config);
        let engine = BudgetEngine::load(&store);
        Self {
            store,
            config,
            gate,
            engine,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn state(&self) -> GateState {
        self.gate.state()
    }

    pub fn pin_error(&self) -> bool {
        self.gate.has_error()
    }

    pub fn has_legacy_pin(&self) -> bool {
        self.gate.has_legacy_credential()
    }

    pub fn create_credential(&mut self, pin: &str) -> Result<()> {
        self.gate.create_credential(&self.store, pin)
    }

    pub fn verify(&mut self, pin: &str) -> Result<()> {
        self.gate.verify(&self.store, pin)
    }

    pub fn lock(&mut self) {
        self.gate.lock();
    }

    pub fn forget_credential(&mut self, confirmed: bool) -> Result<bool> {
        let wiped = self.gate.forget_credential(&self.store, confirmed)?;
        if wiped {
            self.engine.mark_cleared();
        }
        Ok(wiped)
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.gate.is_unlocked() {
            Ok(())
        } else {
            Err(BudgetError::Locked)
        }
    }

    pub fn set_salary(&mut self, amount: Decimal) -> Result<bool> {
        self.ensure_unlocked()?;
        self.engine.set_salary(&self.store, amount)
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<Option<ExpenseRecord>> {
        self.add_expense_at(draft, Utc::now())
    }

    pub fn add_expense_at(
        &mut self,
        draft: ExpenseDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<ExpenseRecord>> {
        self.ensure_unlocked()?;
        self.engine.add_expense_at(&self.store, draft, now)
    }

    pub fn remove_expense(&mut self, id: i64) -> Result<bool> {
        self.ensure_unlocked()?;
        self.engine.remove_expense(&self.store, id)
    }

    /// Clears salary, ledger and PIN; the session ends `Uninitialized`.
    pub fn reset_all(&mut self, confirmed: bool) -> Result<bool> {
        self.ensure_unlocked()?;
        let wiped = self.engine.reset_all(&self.store, confirmed)?;
        if wiped {
            self.gate.mark_cleared();
        }
        Ok(wiped)
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        self.ensure_unlocked()?;
        Ok(self.engine.snapshot())
    }

    pub fn report<Tz: TimeZone>(&self, period: Period, now: &DateTime<Tz>) -> Result<Report> {
        self.ensure_unlocked()?;
        let salary = self.engine.salary();
        let records: Vec<ExpenseRecord> = period::filter(self.engine.ledger(), period, now)
            .into_iter()
            .cloned()
            .collect();
        let totals = Totals::compute(&records, salary);
        Ok(Report {
            period,
            generated_at: now.with_timezone(&Utc),
            salary,
            records,
            totals,
        })
    }

    pub fn theme(&self) -> Theme {
        self.store.read(Key::Theme, Theme::default())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.write(Key::Theme, &theme)
    }

    /// Replace everything with the contents of a browser-storage dump.
    /// A raw PIN in the dump is kept as-is and hashed on first verify.
    pub fn import_legacy(&mut self, dump: &LegacyDump, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.store.clear()?;
        if let Some(pin) = &dump.pin {
            self.store.write(Key::CredentialHash, pin)?;
        }
        if dump.salary > Decimal::ZERO {
            self.store.write(Key::Salary, &dump.salary)?;
        }
        if !dump.ledger.is_empty() {
            self.store.write(Key::Ledger, &dump.ledger)?;
        }
        if let Some(theme) = dump.theme {
            self.store.write(Key::Theme, &theme)?;
        }
        self.gate = CredentialGate::load(&self.store, &self.config);
        self.engine = BudgetEngine::load(&self.store);
        info!(records = dump.ledger.len(), "legacy data imported");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    fn session() -> Session {
        let store = LedgerStore::open_in_memory().unwrap();
        Session::with_store(store, Config::for_tests())
    }

    #[test]
    fn ledger_is_gated_until_unlocked() {
        let mut s = session();
        assert!(matches!(
            s.set_salary(Decimal::from(10)).unwrap_err(),
            BudgetError::Locked
        ));
        s.create_credential("1234").unwrap();
        s.set_salary(Decimal::from(10)).unwrap();
        s.lock();
        assert!(matches!(s.snapshot().unwrap_err(), BudgetError::Locked));
        s.verify("1234").unwrap();
        assert_eq!(s.snapshot().unwrap().salary, Decimal::from(10));
    }

    #[test]
    fn reset_returns_to_uninitialized() {
        let mut s = session();
        s.create_credential("1234").unwrap();
        s.set_salary(Decimal::from(1500)).unwrap();
        s.add_expense(ExpenseDraft {
            name: "Arroz".into(),
            quantity: Some("5".into()),
            unit: Unit::Pounds,
            amount: Some(Decimal::from(20)),
        })
        .unwrap();
        s.set_theme(Theme::Dark).unwrap();

        assert!(!s.reset_all(false).unwrap());
        assert!(s.reset_all(true).unwrap());
        assert_eq!(s.state(), GateState::Uninitialized);
        assert_eq!(s.theme(), Theme::Light);

        s.create_credential("5678").unwrap();
        let snap = s.snapshot().unwrap();
        assert!(snap.salary.is_zero());
        assert!(snap.ledger.is_empty());
    }

    #[test]
    fn forget_works_while_locked() {
        let mut s = session();
        s.create_credential("1234").unwrap();
        s.set_salary(Decimal::from(99)).unwrap();
        s.lock();
        assert!(s.forget_credential(true).unwrap());
        assert_eq!(s.state(), GateState::Uninitialized);
        assert!(s.store().is_empty().unwrap());
    }
}
