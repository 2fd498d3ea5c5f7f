// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable key-value storage for the whole application state.
//!
//! Reads never fail: a missing or unparsable value yields the caller's
//! default. Writes go straight to SQLite; there is no batching and no
//! transaction spanning two keys.

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::db;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Salary,
    Ledger,
    CredentialHash,
    Theme,
    NextId,
}

impl Key {
    pub const ALL: [Key; 5] = [
        Key::Salary,
        Key::Ledger,
        Key::CredentialHash,
        Key::Theme,
        Key::NextId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Salary => "salary",
            Key::Ledger => "ledger",
            Key::CredentialHash => "credential_hash",
            Key::Theme => "theme",
            Key::NextId => "next_id",
        }
    }
}

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let conn = db::open_or_init(config)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        db::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Stored JSON text for `key`, if any.
    pub fn read_raw(&self, key: Key) -> Option<String> {
        match self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key=?1",
                params![key.as_str()],
                |r| r.get::<_, String>(0),
            )
            .optional()
        {
            Ok(v) => v,
            Err(err) => {
                warn!(key = key.as_str(), %err, "read failed, treating as absent");
                None
            }
        }
    }

    pub fn read<T: DeserializeOwned>(&self, key: Key, default: T) -> T {
        let Some(raw) = self.read_raw(key) else {
            return default;
        };
        match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(err) => {
                warn!(key = key.as_str(), %err, "stored value is corrupt, using default");
                default
            }
        }
    }

    pub fn write<T: Serialize + ?Sized>(&self, key: Key, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key.as_str(), json],
        )?;
        debug!(key = key.as_str(), bytes = json.len(), "persisted");
        Ok(())
    }

    /// Wipe every key in a single statement.
    pub fn clear(&self) -> Result<()> {
        let n = self.conn.execute("DELETE FROM kv", [])?;
        debug!(keys = n, "store cleared");
        Ok(())
    }

    /// True when nothing at all has been persisted.
    pub fn is_empty(&self) -> Result<bool> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))?;
        Ok(n == 0)
    }
}
