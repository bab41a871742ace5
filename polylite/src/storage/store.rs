// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Typed record store for catalog data
//!
//! `CatalogStore` owns the three trees the catalog uses - `assets`,
//! `accounts`, and `content` - and handles bincode encoding of records.
//! Asset loads return the raw stored bytes alongside the decoded record so
//! the facade can run optimistic compare-and-swap mutations against exactly
//! what it read.
//!
//! The `content` tree is a presence registry for content element ids; the
//! blobs themselves live elsewhere (out of scope). Content registration and
//! account provisioning are seeded by the embedding host.

use super::factory::create_storage_driver;
use super::traits::{StorageDriver, StorageTree};
use super::types::{StorageResult, StorageType};
use crate::model::{Account, Asset};
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::Path;

/// Tree names, pre-created at open
const TREE_ASSETS: &str = "assets";
const TREE_ACCOUNTS: &str = "accounts";
const TREE_CONTENT: &str = "content";

/// The record store the catalog facade talks to
pub struct CatalogStore {
    driver: Box<dyn StorageDriver<Tree = Box<dyn StorageTree>>>,
    assets: Box<dyn StorageTree>,
    accounts: Box<dyn StorageTree>,
    content: Box<dyn StorageTree>,
    storage_type: StorageType,
}

impl CatalogStore {
    /// Open or create a catalog store at the given path
    pub fn open<P: AsRef<Path>>(storage_type: StorageType, path: P) -> StorageResult<Self> {
        info!(
            "Opening catalog store ({}) at {:?}",
            storage_type,
            path.as_ref()
        );
        let driver = create_storage_driver(storage_type, path)?;
        let assets = driver.open_tree(TREE_ASSETS)?;
        let accounts = driver.open_tree(TREE_ACCOUNTS)?;
        let content = driver.open_tree(TREE_CONTENT)?;
        debug!("Pre-created trees: {}, {}, {}", TREE_ASSETS, TREE_ACCOUNTS, TREE_CONTENT);
        Ok(Self {
            driver,
            assets,
            accounts,
            content,
            storage_type,
        })
    }

    /// Open an in-memory store (testing and embedding without persistence)
    pub fn in_memory() -> StorageResult<Self> {
        Self::open(StorageType::Memory, "")
    }

    /// The backend this store runs on
    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    // === Assets ===

    /// Load an asset with the raw bytes it was stored as
    pub fn load_asset(&self, asset_id: &str) -> StorageResult<Option<(Asset, Vec<u8>)>> {
        match self.assets.get(asset_id.as_bytes())? {
            Some(raw) => {
                let asset: Asset = bincode::deserialize(&raw)?;
                Ok(Some((asset, raw)))
            }
            None => Ok(None),
        }
    }

    /// Insert a new asset; fails the swap if the id is already taken
    pub fn insert_asset_if_absent(&self, asset: &Asset) -> StorageResult<bool> {
        let encoded = bincode::serialize(asset)?;
        self.assets
            .compare_and_swap(asset.asset_id.as_bytes(), None, Some(&encoded))
    }

    /// Atomically replace an asset if its stored bytes still equal `old_raw`
    pub fn swap_asset(&self, old_raw: &[u8], asset: &Asset) -> StorageResult<bool> {
        let encoded = bincode::serialize(asset)?;
        self.assets
            .compare_and_swap(asset.asset_id.as_bytes(), Some(old_raw), Some(&encoded))
    }

    /// Hard-delete an asset
    pub fn remove_asset(&self, asset_id: &str) -> StorageResult<()> {
        self.assets.remove(asset_id.as_bytes())
    }

    /// Replace an asset's curation labels
    ///
    /// Operator tooling, like account provisioning: not reachable through
    /// the catalog facade. Returns false when the asset does not exist or
    /// was modified concurrently.
    pub fn set_admin_tags(
        &self,
        asset_id: &str,
        admin_tags: BTreeSet<String>,
    ) -> StorageResult<bool> {
        match self.load_asset(asset_id)? {
            Some((mut asset, raw)) => {
                asset.admin_tags = admin_tags;
                self.swap_asset(&raw, &asset)
            }
            None => Ok(false),
        }
    }

    /// Load every asset record
    ///
    /// Listing candidate sets are built from a full scan; endpoint-level
    /// restriction and filtering happen in the query engine.
    pub fn scan_assets(&self) -> StorageResult<Vec<Asset>> {
        let mut assets = Vec::new();
        for entry in self.assets.iter()? {
            let (_key, raw) = entry?;
            assets.push(bincode::deserialize(&raw)?);
        }
        Ok(assets)
    }

    // === Accounts ===

    /// Load an account with the raw bytes it was stored as
    pub fn load_account(&self, account_id: &str) -> StorageResult<Option<(Account, Vec<u8>)>> {
        match self.accounts.get(account_id.as_bytes())? {
            Some(raw) => {
                let account: Account = bincode::deserialize(&raw)?;
                Ok(Some((account, raw)))
            }
            None => Ok(None),
        }
    }

    /// Create or overwrite an account record (identity-layer provisioning)
    pub fn upsert_account(&self, account: &Account) -> StorageResult<()> {
        let encoded = bincode::serialize(account)?;
        self.accounts.insert(account.account_id.as_bytes(), &encoded)
    }

    /// Atomically replace an account if its stored bytes still equal `old_raw`
    pub fn swap_account(&self, old_raw: &[u8], account: &Account) -> StorageResult<bool> {
        let encoded = bincode::serialize(account)?;
        self.accounts
            .compare_and_swap(account.account_id.as_bytes(), Some(old_raw), Some(&encoded))
    }

    // === Content elements ===

    /// Register a content element id as resolvable
    pub fn register_content(&self, content_id: &str) -> StorageResult<()> {
        self.content.insert(content_id.as_bytes(), b"")
    }

    /// Of the given ids, return the subset that resolves
    pub fn resolve_content(&self, ids: &BTreeSet<String>) -> StorageResult<BTreeSet<String>> {
        let mut resolved = BTreeSet::new();
        for id in ids {
            if self.content.contains_key(id.as_bytes())? {
                resolved.insert(id.clone());
            }
        }
        Ok(resolved)
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> StorageResult<()> {
        self.driver.flush()
    }
}
