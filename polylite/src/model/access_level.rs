// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Asset visibility tiers

use serde::{Deserialize, Serialize};

/// Visibility tier of an asset
///
/// A closed enum - visibility decisions are exhaustive matches over these
/// three states, never open dispatch. For visibility purposes the tiers are
/// ordered `Private < Unlisted < Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    /// Visible only to the owning account
    Private,

    /// Reachable by direct reference, never listed globally
    Unlisted,

    /// Visible to everyone and eligible for global listing
    Public,
}

impl Default for AccessLevel {
    fn default() -> Self {
        // New assets are private until the owner publishes them
        AccessLevel::Private
    }
}

impl std::str::FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(AccessLevel::Private),
            "unlisted" => Ok(AccessLevel::Unlisted),
            "public" => Ok(AccessLevel::Public),
            _ => Err(format!(
                "Unknown access level: {}. Valid options: private, unlisted, public",
                s
            )),
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AccessLevel::Private => "private",
            AccessLevel::Unlisted => "unlisted",
            AccessLevel::Public => "public",
        };
        write!(f, "{}", name)
    }
}

impl AccessLevel {
    /// Whether an asset at this level can be read without owning it
    pub fn visible_to_non_owner(&self) -> bool {
        match self {
            AccessLevel::Private => false,
            AccessLevel::Unlisted | AccessLevel::Public => true,
        }
    }
}
