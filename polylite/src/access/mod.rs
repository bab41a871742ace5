// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Access control evaluation
//!
//! Pure predicates that decide per-request visibility and mutability from an
//! asset's access level and the resolved caller identity. No storage access
//! happens here; every decision is a function of already-loaded data.
//!
//! Listing operations apply two layers: an endpoint-level candidate
//! restriction ([`ListingScope::admits`]) and the per-item [`can_view`]
//! check. Both must pass; the second is a defensive re-check, not a
//! replacement for the first.

use crate::model::{AccessLevel, Asset};

/// Resolved caller identity attached to every operation
///
/// Authentication happens upstream; the catalog receives either a resolved
/// account id or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No credential was presented or resolution failed upstream
    Anonymous,

    /// Authenticated as the given account
    Account(String),
}

impl Caller {
    /// Convenience constructor for an authenticated caller
    pub fn account(account_id: impl Into<String>) -> Self {
        Caller::Account(account_id.into())
    }

    /// The caller's account id, if authenticated
    pub fn account_id(&self) -> Option<&str> {
        match self {
            Caller::Anonymous => None,
            Caller::Account(id) => Some(id.as_str()),
        }
    }

    /// Whether this caller is the given account
    pub fn is(&self, account_id: &str) -> bool {
        self.account_id() == Some(account_id)
    }
}

/// Whether the caller may read the asset
///
/// Public and unlisted assets are readable by anyone who can name them;
/// private assets only by their owner.
pub fn can_view(asset: &Asset, caller: &Caller) -> bool {
    asset.access_level.visible_to_non_owner() || caller.is(&asset.owner_id)
}

/// Whether the caller may mutate or delete the asset
///
/// Only the owner, and only when authenticated. No delegation, no admin
/// override.
pub fn can_mutate(asset: &Asset, caller: &Caller) -> bool {
    caller.is(&asset.owner_id)
}

/// Endpoint-level candidate restriction for listing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingScope {
    /// The global listing: only public assets, regardless of caller
    Global,

    /// A per-account listing: all of the target's assets when the caller is
    /// the target, otherwise only the target's public assets
    Account(String),
}

impl ListingScope {
    /// Whether the asset belongs to this scope's candidate set
    pub fn admits(&self, asset: &Asset, caller: &Caller) -> bool {
        match self {
            ListingScope::Global => asset.access_level == AccessLevel::Public,
            ListingScope::Account(account_id) => {
                if asset.owner_id != *account_id {
                    return false;
                }
                caller.is(account_id) || asset.access_level == AccessLevel::Public
            }
        }
    }
}
