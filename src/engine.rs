// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Salary, expense ledger and the aggregates derived from them.
//!
//! The engine holds in-memory working copies; every mutation is written
//! through to the store before it returns. Callers are expected to have
//! unlocked the PIN gate first.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{ExpenseDraft, ExpenseRecord};
use crate::period::Period;
use crate::store::{Key, LedgerStore};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const WARNING_ABOVE: i64 = 50;
const CRITICAL_ABOVE: i64 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Normal,
    Warning,
    Critical,
}

impl StatusLevel {
    /// Normal up to and including 50%, Warning up to and including 80%.
    pub fn from_percentage(p: Decimal) -> Self {
        if p <= Decimal::from(WARNING_ABOVE) {
            StatusLevel::Normal
        } else if p <= Decimal::from(CRITICAL_ABOVE) {
            StatusLevel::Warning
        } else {
            StatusLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Normal => "normal",
            StatusLevel::Warning => "warning",
            StatusLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_spent: Decimal,
    /// Negative when overspent.
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub status: StatusLevel,
}

impl Totals {
    pub fn compute<'a, I>(records: I, salary: Decimal) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let total_spent = records
            .into_iter()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount));
        let remaining = salary.saturating_sub(total_spent);
        let percentage = if salary > Decimal::ZERO {
            total_spent
                .checked_div(salary)
                .and_then(|q| q.checked_mul(HUNDRED))
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        };
        Totals {
            total_spent,
            remaining,
            percentage,
            status: StatusLevel::from_percentage(percentage),
        }
    }
}

/// What collaborators read after every action.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub salary: Decimal,
    pub ledger: Vec<ExpenseRecord>,
    #[serde(flatten)]
    pub totals: Totals,
}

/// A period-narrowed view for reports and exports.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub period: Period,
    pub generated_at: DateTime<Utc>,
    pub salary: Decimal,
    pub records: Vec<ExpenseRecord>,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Debug, Default)]
pub struct BudgetEngine {
    salary: Decimal,
    ledger: Vec<ExpenseRecord>,
    next_id: i64,
}

impl BudgetEngine {
    pub fn load(store: &LedgerStore) -> Self {
        let mut salary: Decimal = store.read(Key::Salary, Decimal::ZERO);
        if salary < Decimal::ZERO {
            warn!(%salary, "negative salary in store, treating as unset");
            salary = Decimal::ZERO;
        }
        let ledger: Vec<ExpenseRecord> = store.read(Key::Ledger, Vec::new());
        let stored_next: i64 = store.read(Key::NextId, 1);
        let next_id = ledger
            .iter()
            .map(|r| r.id.saturating_add(1))
            .fold(stored_next.max(1), i64::max);
        Self {
            salary,
            ledger,
            next_id,
        }
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }

    pub fn is_salary_set(&self) -> bool {
        !self.salary.is_zero()
    }

    /// Newest first.
    pub fn ledger(&self) -> &[ExpenseRecord] {
        &self.ledger
    }

    /// Returns `false` (and changes nothing) unless `amount > 0`.
    pub fn set_salary(&mut self, store: &LedgerStore, amount: Decimal) -> Result<bool> {
        if amount <= Decimal::ZERO {
            debug!(%amount, "salary ignored");
            return Ok(false);
        }
        store.write(Key::Salary, &amount)?;
        self.salary = amount;
        Ok(true)
    }

    pub fn add_expense(
        &mut self,
        store: &LedgerStore,
        draft: ExpenseDraft,
    ) -> Result<Option<ExpenseRecord>> {
        self.add_expense_at(store, draft, Utc::now())
    }

    /// Insert at the head of the ledger. A blank name or a missing amount
    /// makes this a no-op returning `None`.
    pub fn add_expense_at(
        &mut self,
        store: &LedgerStore,
        draft: ExpenseDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<ExpenseRecord>> {
        let name = draft.name.trim();
        let Some(amount) = draft.amount else {
            debug!("expense without amount ignored");
            return Ok(None);
        };
        if name.is_empty() {
            debug!("expense without name ignored");
            return Ok(None);
        }
        let record = ExpenseRecord {
            id: self.next_id,
            // stored as epoch millis
            created_at: now.trunc_subsecs(3),
            name: name.to_string(),
            quantity: draft
                .quantity
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            unit: draft.unit,
            amount,
        };
        let mut ledger = self.ledger.clone();
        ledger.insert(0, record.clone());
        let next_id = self.next_id.saturating_add(1);

        store.write(Key::NextId, &next_id)?;
        store.write(Key::Ledger, &ledger)?;
        self.ledger = ledger;
        self.next_id = next_id;
        debug!(id = record.id, "expense added");
        Ok(Some(record))
    }

    /// Returns whether a record was removed.
    pub fn remove_expense(&mut self, store: &LedgerStore, id: i64) -> Result<bool> {
        let Some(pos) = self.ledger.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let mut ledger = self.ledger.clone();
        ledger.remove(pos);
        store.write(Key::Ledger, &ledger)?;
        self.ledger = ledger;
        debug!(id, "expense removed");
        Ok(true)
    }

    /// Wipe salary, ledger and everything else in the store. The PIN gate
    /// must be resynced by the caller.
    pub fn reset_all(&mut self, store: &LedgerStore, confirmed: bool) -> Result<bool> {
        if !confirmed {
            warn!("reset requested without confirmation; ignored");
            return Ok(false);
        }
        store.clear()?;
        self.mark_cleared();
        info!("all data reset");
        Ok(true)
    }

    pub(crate) fn mark_cleared(&mut self) {
        *self = Self {
            next_id: 1,
            ..Self::default()
        };
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.ledger, self.salary)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            salary: self.salary,
            ledger: self.ledger.clone(),
            totals: self.totals(),
        }
    }
}
