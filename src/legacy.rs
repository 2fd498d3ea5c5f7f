// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dumps of the browser-storage version of the app.
//!
//! That version kept one string per key: `app_pin` (raw digits), `salario`
//! (a number as text), `gastos` (a JSON array with Spanish field names)
//! and optionally `theme`. A dump is a JSON object holding those strings.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::warn;

use crate::error::{BudgetError, Result};
use crate::models::{ExpenseRecord, Theme, coerce_amount};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyDump {
    pub pin: Option<String>,
    pub salary: Decimal,
    pub ledger: Vec<ExpenseRecord>,
    pub theme: Option<Theme>,
}

impl LegacyDump {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BudgetError::Validation(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let obj: Map<String, Value> = serde_json::from_str(text)?;
        let pin = obj
            .get("app_pin")
            .and_then(as_text)
            .filter(|p| !p.is_empty());
        let salary = obj
            .get("salario")
            .map(|v| coerce_amount(&inner_json(v)))
            .filter(|s| *s > Decimal::ZERO)
            .unwrap_or(Decimal::ZERO);
        let ledger = match obj.get("gastos").map(inner_json) {
            Some(v @ Value::Array(_)) => serde_json::from_value(v).unwrap_or_else(|err| {
                warn!(%err, "unreadable expense list in dump, skipping it");
                Vec::new()
            }),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                warn!("expense list in dump is not an array, skipping it");
                Vec::new()
            }
        };
        let theme = obj
            .get("theme")
            .and_then(as_text)
            .and_then(|t| t.parse().ok());
        Ok(Self {
            pin,
            salary,
            ledger,
            theme,
        })
    }
}

fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Browser storage holds strings; most of them are JSON themselves.
fn inner_json(v: &Value) -> Value {
    match v {
        Value::String(s) => serde_json::from_str(s).unwrap_or_else(|_| v.clone()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    #[test]
    fn parses_string_encoded_dump() {
        let dump = LegacyDump::from_json(
            r#"{
                "app_pin": "2468",
                "salario": "1500",
                "gastos": "[{\"id\":1700000000000,\"nombre\":\"Arroz\",\"peso\":\"5\",\"unidad\":\"lbs\",\"costo\":20},{\"id\":1700000000001,\"nombre\":\"Aceite\",\"peso\":\"\",\"unidad\":\"unidades\",\"costo\":null}]",
                "theme": "dark"
            }"#,
        )
        .unwrap();
        assert_eq!(dump.pin.as_deref(), Some("2468"));
        assert_eq!(dump.salary, Decimal::from(1500));
        assert_eq!(dump.ledger.len(), 2);
        assert_eq!(dump.ledger[1].unit, Unit::UnitCount);
        assert_eq!(dump.ledger[1].amount, Decimal::ZERO);
        assert_eq!(dump.theme, Some(Theme::Dark));
    }

    #[test]
    fn garbage_values_fall_back() {
        let dump =
            LegacyDump::from_json(r#"{"salario": "abc", "gastos": "{oops"}"#).unwrap();
        assert_eq!(dump.salary, Decimal::ZERO);
        assert!(dump.ledger.is_empty());
        assert_eq!(dump.pin, None);
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(LegacyDump::from_json("[1,2]").is_err());
    }
}
