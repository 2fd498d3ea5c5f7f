// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! PIN lifecycle: create, verify, lock and forget.
//!
//! The PIN itself is never persisted; only an Argon2id PHC string is. Older
//! installs kept the raw digits under the same key. Such a credential is
//! still accepted and is rewritten as a hash the first time it verifies.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Serialize;
use serde_json::Value;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::config::{Config, HashCost};
use crate::error::{BudgetError, Result};
use crate::store::{Key, LedgerStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    Uninitialized,
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoredCredential {
    Hashed(String),
    LegacyPlain(String),
}

impl StoredCredential {
    fn from_stored(v: Value) -> Option<Self> {
        let raw = match v {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if raw.is_empty() {
            None
        } else if raw.chars().all(|c| c.is_ascii_digit()) {
            Some(StoredCredential::LegacyPlain(raw))
        } else {
            Some(StoredCredential::Hashed(raw))
        }
    }
}

/// Keep only ASCII digits; everything else typed into the PIN box is dropped.
pub fn normalize_pin(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[derive(Debug, Clone)]
pub struct PinHasher {
    cost: HashCost,
}

impl PinHasher {
    pub fn new(cost: HashCost) -> Self {
        Self { cost }
    }

    pub fn hash(&self, pin: &str) -> Result<String> {
        let params = Params::new(
            self.cost.memory_cost,
            self.cost.time_cost,
            self.cost.parallelism,
            None,
        )
        .map_err(|e| BudgetError::Hash(format!("invalid Argon2 params: {}", e)))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(pin.as_bytes(), &salt)
            .map_err(|e| BudgetError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    pub fn verify(&self, pin: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| BudgetError::Hash(format!("stored PIN hash is unreadable: {}", e)))?;
        match Argon2::default().verify_password(pin.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(BudgetError::Hash(e.to_string())),
        }
    }
}

pub struct CredentialGate {
    credential: Option<StoredCredential>,
    state: GateState,
    failed_attempt: bool,
    min_pin_len: usize,
    hasher: PinHasher,
}

impl CredentialGate {
    /// Start a session: `Locked` if a credential is stored, else `Uninitialized`.
    pub fn load(store: &LedgerStore, config: &Config) -> Self {
        let credential = StoredCredential::from_stored(store.read(Key::CredentialHash, Value::Null));
        let state = if credential.is_some() {
            GateState::Locked
        } else {
            GateState::Uninitialized
        };
        Self {
            credential,
            state,
            failed_attempt: false,
            min_pin_len: config.min_pin_len,
            hasher: PinHasher::new(config.hash),
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Set by a failed `verify`, cleared by the next attempt.
    pub fn has_error(&self) -> bool {
        self.failed_attempt
    }

    pub fn has_legacy_credential(&self) -> bool {
        matches!(self.credential, Some(StoredCredential::LegacyPlain(_)))
    }

    pub fn create_credential(&mut self, store: &LedgerStore, pin: &str) -> Result<()> {
        if self.state != GateState::Uninitialized {
            return Err(BudgetError::CredentialExists);
        }
        let pin = normalize_pin(pin);
        if pin.len() < self.min_pin_len {
            return Err(BudgetError::Validation(format!(
                "PIN must have at least {} digits",
                self.min_pin_len
            )));
        }
        let hash = self.hasher.hash(&pin)?;
        store.write(Key::CredentialHash, &hash)?;
        self.credential = Some(StoredCredential::Hashed(hash));
        self.state = GateState::Unlocked;
        self.failed_attempt = false;
        info!("PIN created");
        Ok(())
    }

    /// Check `pin` against the stored credential. A mismatch leaves the gate
    /// `Locked`, even if it was unlocked before the attempt.
    pub fn verify(&mut self, store: &LedgerStore, pin: &str) -> Result<()> {
        let Some(credential) = self.credential.clone() else {
            return Err(BudgetError::NoCredential);
        };
        self.failed_attempt = false;
        let pin = normalize_pin(pin);
        let matched = match &credential {
            StoredCredential::Hashed(hash) => self.hasher.verify(&pin, hash)?,
            StoredCredential::LegacyPlain(plain) => {
                bool::from(plain.as_bytes().ct_eq(pin.as_bytes()))
            }
        };
        if !matched {
            self.state = GateState::Locked;
            self.failed_attempt = true;
            return Err(BudgetError::Authentication);
        }
        if let StoredCredential::LegacyPlain(_) = credential {
            let hash = self.hasher.hash(&pin)?;
            store.write(Key::CredentialHash, &hash)?;
            self.credential = Some(StoredCredential::Hashed(hash));
            info!("legacy plaintext PIN rewritten as a hash");
        }
        self.state = GateState::Unlocked;
        Ok(())
    }

    pub fn lock(&mut self) {
        if self.state == GateState::Unlocked {
            self.state = GateState::Locked;
        }
    }

    /// Wipe every persisted key, credential included. Without `confirmed`
    /// nothing happens and `false` is returned.
    pub fn forget_credential(&mut self, store: &LedgerStore, confirmed: bool) -> Result<bool> {
        if !confirmed {
            warn!("forget PIN requested without confirmation; ignored");
            return Ok(false);
        }
        store.clear()?;
        self.mark_cleared();
        info!("PIN forgotten, all data wiped");
        Ok(true)
    }

    /// Resync after the store was wiped by someone else.
    pub(crate) fn mark_cleared(&mut self) {
        self.credential = None;
        self.state = GateState::Uninitialized;
        self.failed_attempt = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> (LedgerStore, CredentialGate) {
        let store = LedgerStore::open_in_memory().unwrap();
        let gate = CredentialGate::load(&store, &Config::for_tests());
        (store, gate)
    }

    #[test]
    fn fresh_store_is_uninitialized() {
        let (_store, gate) = gate();
        assert_eq!(gate.state(), GateState::Uninitialized);
    }

    #[test]
    fn create_then_verify_unlocks() {
        let (store, mut gate) = gate();
        gate.create_credential(&store, "4821").unwrap();
        assert_eq!(gate.state(), GateState::Unlocked);
        gate.lock();
        assert_eq!(gate.state(), GateState::Locked);
        gate.verify(&store, "4821").unwrap();
        assert!(gate.is_unlocked());
        assert!(!gate.has_error());
    }

    #[test]
    fn stored_credential_is_not_the_pin() {
        let (store, mut gate) = gate();
        gate.create_credential(&store, "4821").unwrap();
        let raw = store.read_raw(Key::CredentialHash).unwrap();
        assert!(!raw.contains("4821"));
        assert!(raw.contains("$argon2id$"));
    }

    #[test]
    fn wrong_pin_sets_flag_and_stays_locked() {
        let (store, mut gate) = gate();
        gate.create_credential(&store, "1111").unwrap();
        gate.lock();
        let err = gate.verify(&store, "2222").unwrap_err();
        assert!(matches!(err, BudgetError::Authentication));
        assert_eq!(gate.state(), GateState::Locked);
        assert!(gate.has_error());

        gate.verify(&store, "1111").unwrap();
        assert!(!gate.has_error());
    }

    #[test]
    fn short_pin_rejected_after_filtering() {
        let (store, mut gate) = gate();
        let err = gate.create_credential(&store, "12ab").unwrap_err();
        assert!(matches!(err, BudgetError::Validation(_)));
        assert_eq!(gate.state(), GateState::Uninitialized);
        assert!(store.read_raw(Key::CredentialHash).is_none());
    }

    #[test]
    fn non_digits_are_stripped() {
        assert_eq!(normalize_pin(" 12-34x"), "1234");
        let (store, mut gate) = gate();
        gate.create_credential(&store, "12-34").unwrap();
        gate.lock();
        gate.verify(&store, "1234").unwrap();
    }

    #[test]
    fn session_reload_starts_locked() {
        let (store, mut gate) = gate();
        gate.create_credential(&store, "9876").unwrap();
        let reloaded = CredentialGate::load(&store, &Config::for_tests());
        assert_eq!(reloaded.state(), GateState::Locked);
    }

    #[test]
    fn second_create_is_refused() {
        let (store, mut gate) = gate();
        gate.create_credential(&store, "9876").unwrap();
        let err = gate.create_credential(&store, "5555").unwrap_err();
        assert!(matches!(err, BudgetError::CredentialExists));
    }

    #[test]
    fn legacy_plaintext_pin_is_migrated() {
        let store = LedgerStore::open_in_memory().unwrap();
        store.write(Key::CredentialHash, "2468").unwrap();
        let mut gate = CredentialGate::load(&store, &Config::for_tests());
        assert!(gate.has_legacy_credential());
        assert_eq!(gate.state(), GateState::Locked);

        gate.verify(&store, "2468").unwrap();
        assert!(!gate.has_legacy_credential());
        let raw = store.read_raw(Key::CredentialHash).unwrap();
        assert!(raw.contains("$argon2id$"));

        let mut again = CredentialGate::load(&store, &Config::for_tests());
        again.verify(&store, "2468").unwrap();
    }

    #[test]
    fn forget_requires_confirmation() {
        let (store, mut gate) = gate();
        gate.create_credential(&store, "1357").unwrap();
        assert!(!gate.forget_credential(&store, false).unwrap());
        assert!(store.read_raw(Key::CredentialHash).is_some());

        assert!(gate.forget_credential(&store, true).unwrap());
        assert_eq!(gate.state(), GateState::Uninitialized);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn verify_without_credential_fails() {
        let (store, mut gate) = gate();
        assert!(matches!(
            gate.verify(&store, "1234").unwrap_err(),
            BudgetError::NoCredential
        ));
    }
}
