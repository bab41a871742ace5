// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Account records

use serde::{Deserialize, Serialize};

/// An account that owns catalog assets
///
/// Accounts are provisioned by the identity layer (out of scope here); the
/// catalog reads them, denormalizes them into listing responses, and accepts
/// self-service description updates. Accounts are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, stable account identifier, assigned by the identity layer
    pub account_id: String,

    /// Human-readable display name
    pub display_name: String,

    /// Free-form profile description
    pub description: String,
}

impl Account {
    /// Create a new account record
    pub fn new(account_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            display_name: display_name.into(),
            description: String::new(),
        }
    }
}
