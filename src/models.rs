// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    #[default]
    #[serde(alias = "lbs")]
    Pounds,
    #[serde(alias = "kgs")]
    Kilograms,
    #[serde(alias = "unidades")]
    UnitCount,
    #[serde(alias = "litros")]
    Liters,
    Milliliters,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pounds => "pounds",
            Unit::Kilograms => "kilograms",
            Unit::UnitCount => "unit-count",
            Unit::Liters => "liters",
            Unit::Milliliters => "milliliters",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pounds" | "lbs" | "lb" => Ok(Unit::Pounds),
            "kilograms" | "kgs" | "kg" => Ok(Unit::Kilograms),
            "unit-count" | "units" | "unidades" => Ok(Unit::UnitCount),
            "liters" | "litros" | "l" => Ok(Unit::Liters),
            "milliliters" | "ml" => Ok(Unit::Milliliters),
            other => Err(BudgetError::Validation(format!(
                "Unknown unit '{}' (use pounds|kilograms|unit-count|liters|milliliters)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(BudgetError::Validation(format!(
                "Unknown theme '{}' (use light|dark)",
                other
            ))),
        }
    }
}

/// One purchase in the ledger.
///
/// `id` is only an identity; the purchase date lives in `created_at`.
/// Records written before the two were split carry a millisecond timestamp
/// as their id and no `created_at`; on load the id doubles as the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawExpense")]
pub struct ExpenseRecord {
    pub id: i64,
    #[serde(serialize_with = "chrono::serde::ts_milliseconds::serialize")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    pub unit: Unit,
    pub amount: Decimal,
}

/// Input for a new ledger entry, as collected from the user.
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Unit,
    pub amount: Option<Decimal>,
}

#[derive(Deserialize)]
struct RawExpense {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default, alias = "nombre")]
    name: Option<String>,
    #[serde(default, alias = "peso")]
    quantity: Value,
    #[serde(default, alias = "unidad")]
    unit: Option<String>,
    #[serde(default, alias = "costo")]
    amount: Value,
}

impl From<RawExpense> for ExpenseRecord {
    fn from(raw: RawExpense) -> Self {
        let id = match &raw.id {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        let millis = raw.created_at.unwrap_or(id);
        let created_at = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default();
        ExpenseRecord {
            id,
            created_at,
            name: raw.name.unwrap_or_default(),
            quantity: coerce_quantity(&raw.quantity),
            unit: raw
                .unit
                .as_deref()
                .and_then(|u| u.parse().ok())
                .unwrap_or_default(),
            amount: coerce_amount(&raw.amount),
        }
    }
}

/// Lenient numeric reading: anything that is not a number (or a string
/// holding one) counts as zero.
pub fn coerce_amount(v: &Value) -> Decimal {
    match v {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok()))
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(s))
                .unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

fn coerce_quantity(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
