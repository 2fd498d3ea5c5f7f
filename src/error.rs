// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the ledger and the PIN gate.
///
/// Nothing here is fatal: every variant leaves the session in the state it
/// was in before the failing call.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("{0}")]
    Validation(String),

    #[error("Incorrect PIN")]
    Authentication,

    #[error("No PIN has been created yet")]
    NoCredential,

    #[error("A PIN already exists; forget it first to create a new one")]
    CredentialExists,

    #[error("Ledger is locked; verify the PIN first")]
    Locked,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("PIN hashing failed: {0}")]
    Hash(String),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
