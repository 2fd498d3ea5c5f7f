// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

/// Argon2id cost parameters used when hashing a new PIN.
///
/// Verification reads the parameters back out of the stored hash, so
/// changing these only affects PINs created afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_cost: argon2::Params::DEFAULT_M_COST,
            time_cost: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Database file; `None` means the platform data dir.
    pub db_path: Option<PathBuf>,
    pub min_pin_len: usize,
    pub hash: HashCost,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            min_pin_len: 4,
            hash: HashCost::default(),
        }
    }
}

impl Config {
    /// Cheapest hash settings Argon2 accepts. Not for real PINs.
    pub fn for_tests() -> Self {
        Self {
            hash: HashCost {
                memory_cost: argon2::Params::MIN_M_COST,
                time_cost: argon2::Params::MIN_T_COST,
                parallelism: argon2::Params::MIN_P_COST,
            },
            ..Self::default()
        }
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }
}
