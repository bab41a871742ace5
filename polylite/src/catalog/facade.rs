// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! The catalog facade
//!
//! All externally visible operations live here. The facade loads records
//! from the store, lets the pure engines (access, query, update) do the
//! hard work, and persists results. Mutations are optimistic
//! read-modify-write cycles: the record is re-read and re-validated on
//! every compare-and-swap miss, so concurrent updates to one asset never
//! interleave field by field.

use super::error::{CatalogError, CatalogResult};
use super::operations::{
    CreateAssetRequest, ListRequest, ListResponse, UpdateAccountRequest, UpdateAssetDataRequest,
    UpdateAssetRequest,
};
use crate::access::{can_mutate, can_view, Caller, ListingScope};
use crate::model::{Account, Asset};
use crate::query::{run_listing, PageLimits, QueryPage};
use crate::storage::CatalogStore;
use crate::update::{
    apply_account_mask, apply_asset_mask, replace_formats, replace_thumbnail,
    validate_content_refs, validate_formats,
};
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Effective page size when the caller passes zero or negative
const DEFAULT_PAGE_SIZE: usize = 100;

/// Page size ceiling for the global listing
const GLOBAL_MAX_PAGE_SIZE: usize = 500;

/// Page size ceiling for the account-scoped listing (external contract)
const ACCOUNT_MAX_PAGE_SIZE: usize = 1000;

/// Compare-and-swap attempts before a mutation gives up
const CAS_RETRY_LIMIT: usize = 8;

/// Sentinel resolving to the caller's own account
const ME: &str = "me";

/// Current time at microsecond resolution
///
/// Page tokens carry microsecond timestamps; creation times are stored at
/// the same resolution so cursor comparisons are exact.
fn timestamp_now() -> chrono::DateTime<chrono::Utc> {
    let now = chrono::Utc::now();
    chrono::DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

/// The externally visible catalog service
///
/// Stateless per request beyond the store reference; safe to share across
/// threads.
pub struct Catalog {
    store: Arc<CatalogStore>,
}

impl Catalog {
    /// Create a catalog over an opened store
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// The underlying record store
    ///
    /// Exposed for the embedding host's provisioning paths (accounts,
    /// content element registration), which are out of catalog scope.
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    // === Asset operations ===

    /// Create an asset owned by the caller
    ///
    /// Assigns the id and creation time; the access level defaults to
    /// private. The format graph and thumbnail references are validated
    /// before anything is persisted.
    pub fn create_asset(&self, caller: &Caller, req: CreateAssetRequest) -> CatalogResult<Asset> {
        let owner_id = caller.account_id().ok_or_else(|| {
            CatalogError::PermissionDenied("Authentication required to create assets".to_string())
        })?;
        if self.store.load_account(owner_id)?.is_none() {
            return Err(CatalogError::account_not_found(owner_id));
        }

        self.validate_references(&req.formats, &req.thumbnail_ids)?;

        let asset = Asset {
            asset_id: format!("assets/{}", uuid::Uuid::new_v4().simple()),
            owner_id: owner_id.to_string(),
            display_name: req.display_name,
            description: req.description,
            tags: req.tags,
            admin_tags: BTreeSet::new(),
            license: req.license,
            access_level: req.access_level.unwrap_or_default(),
            formats: req.formats,
            thumbnail_ids: req.thumbnail_ids,
            remix_info: req.remix_info,
            camera_params: req.camera_params,
            liked_by: BTreeSet::new(),
            create_time: timestamp_now(),
        };

        if !self.store.insert_asset_if_absent(&asset)? {
            // v4 ids do not collide in practice; a hit means store corruption
            return Err(CatalogError::Internal(format!(
                "Asset id collision: {}",
                asset.asset_id
            )));
        }
        info!("Created asset {} owned by {}", asset.asset_id, asset.owner_id);
        Ok(asset)
    }

    /// Fetch one asset, subject to visibility
    ///
    /// An asset that does not exist and one the caller may not view produce
    /// the same NotFound - private records do not leak their existence.
    pub fn get_asset(&self, caller: &Caller, asset_id: &str) -> CatalogResult<Asset> {
        match self.store.load_asset(asset_id)? {
            Some((asset, _)) if can_view(&asset, caller) => Ok(asset),
            _ => Err(CatalogError::asset_not_found(asset_id)),
        }
    }

    /// Apply a field-masked metadata update to an owned asset
    pub fn update_asset(&self, caller: &Caller, req: UpdateAssetRequest) -> CatalogResult<Asset> {
        for _ in 0..CAS_RETRY_LIMIT {
            let (mut asset, raw) = self.load_mutable_asset(caller, &req.asset_id)?;

            // A thumbnail replacement is orthogonal to the mask and may
            // arrive alone; only a request that does neither is malformed
            if !req.update_mask.is_empty() || req.new_thumbnail_id.is_none() {
                apply_asset_mask(&mut asset, &req.patch, &req.update_mask)?;
            }
            if let Some(thumbnail_id) = &req.new_thumbnail_id {
                let wanted: BTreeSet<String> = [thumbnail_id.clone()].into_iter().collect();
                let resolved = self.store.resolve_content(&wanted)?;
                validate_content_refs(std::slice::from_ref(thumbnail_id), &resolved)?;
                replace_thumbnail(&mut asset, thumbnail_id);
            }

            if self.store.swap_asset(&raw, &asset)? {
                debug!("Updated asset {} metadata", asset.asset_id);
                return Ok(asset);
            }
            debug!("CAS miss updating asset {}, retrying", req.asset_id);
        }
        Err(CatalogError::Internal(format!(
            "Concurrent update contention on asset {}",
            req.asset_id
        )))
    }

    /// Replace an asset's entire format list (and thumbnail sequence)
    ///
    /// All-or-nothing: one unresolvable content reference rejects the whole
    /// operation and nothing is persisted.
    pub fn update_asset_data(
        &self,
        caller: &Caller,
        req: UpdateAssetDataRequest,
    ) -> CatalogResult<Asset> {
        for _ in 0..CAS_RETRY_LIMIT {
            let (mut asset, raw) = self.load_mutable_asset(caller, &req.asset_id)?;

            self.validate_references(&req.formats, &req.thumbnail_ids)?;
            replace_formats(&mut asset, req.formats.clone(), req.thumbnail_ids.clone());

            if self.store.swap_asset(&raw, &asset)? {
                debug!("Replaced formats of asset {}", asset.asset_id);
                return Ok(asset);
            }
            debug!("CAS miss replacing formats of {}, retrying", req.asset_id);
        }
        Err(CatalogError::Internal(format!(
            "Concurrent update contention on asset {}",
            req.asset_id
        )))
    }

    /// Record or clear the caller's like on a visible asset
    ///
    /// Backs the `liked:` filter key. Idempotent.
    pub fn set_asset_liked(
        &self,
        caller: &Caller,
        asset_id: &str,
        liked: bool,
    ) -> CatalogResult<Asset> {
        let account_id = caller.account_id().ok_or_else(|| {
            CatalogError::PermissionDenied("Authentication required to like assets".to_string())
        })?;
        for _ in 0..CAS_RETRY_LIMIT {
            let (mut asset, raw) = match self.store.load_asset(asset_id)? {
                Some(loaded) if can_view(&loaded.0, caller) => loaded,
                _ => return Err(CatalogError::asset_not_found(asset_id)),
            };
            let changed = if liked {
                asset.liked_by.insert(account_id.to_string())
            } else {
                asset.liked_by.remove(account_id)
            };
            if !changed {
                return Ok(asset);
            }
            if self.store.swap_asset(&raw, &asset)? {
                return Ok(asset);
            }
        }
        Err(CatalogError::Internal(format!(
            "Concurrent update contention on asset {}",
            asset_id
        )))
    }

    /// Hard-delete an owned asset
    pub fn delete_asset(&self, caller: &Caller, asset_id: &str) -> CatalogResult<()> {
        let (asset, _) = self.load_mutable_asset(caller, asset_id)?;
        self.store.remove_asset(&asset.asset_id)?;
        info!("Deleted asset {}", asset.asset_id);
        Ok(())
    }

    /// List public assets across the whole catalog
    pub fn list_assets(&self, caller: &Caller, req: ListRequest) -> CatalogResult<ListResponse> {
        let page = self.run_query(
            caller,
            &ListingScope::Global,
            &req,
            PageLimits {
                default_size: DEFAULT_PAGE_SIZE,
                max_size: GLOBAL_MAX_PAGE_SIZE,
            },
        )?;
        self.denormalize(page)
    }

    /// List one account's assets
    ///
    /// The caller sees all of their own assets, and only public assets of
    /// anyone else. Accepts the `"me"` sentinel.
    pub fn list_assets_by_account(
        &self,
        caller: &Caller,
        account_id: &str,
        req: ListRequest,
    ) -> CatalogResult<ListResponse> {
        let account_id = self.resolve_account_id(caller, account_id)?;
        if self.store.load_account(&account_id)?.is_none() {
            return Err(CatalogError::account_not_found(&account_id));
        }
        let page = self.run_query(
            caller,
            &ListingScope::Account(account_id),
            &req,
            PageLimits {
                default_size: DEFAULT_PAGE_SIZE,
                max_size: ACCOUNT_MAX_PAGE_SIZE,
            },
        )?;
        self.denormalize(page)
    }

    // === Account operations ===

    /// Fetch an account, accepting the `"me"` sentinel
    pub fn get_account(&self, caller: &Caller, account_id: &str) -> CatalogResult<Account> {
        let account_id = self.resolve_account_id(caller, account_id)?;
        match self.store.load_account(&account_id)? {
            Some((account, _)) => Ok(account),
            None => Err(CatalogError::account_not_found(&account_id)),
        }
    }

    /// Apply a field-masked self-service update to the caller's account
    pub fn update_account(
        &self,
        caller: &Caller,
        req: UpdateAccountRequest,
    ) -> CatalogResult<Account> {
        let account_id = self.resolve_account_id(caller, &req.account_id)?;
        for _ in 0..CAS_RETRY_LIMIT {
            let (mut account, raw) = self
                .store
                .load_account(&account_id)?
                .ok_or_else(|| CatalogError::account_not_found(&account_id))?;
            if !caller.is(&account_id) {
                return Err(CatalogError::PermissionDenied(format!(
                    "Only {} may update this account",
                    account_id
                )));
            }

            apply_account_mask(&mut account, &req.patch, &req.update_mask)?;

            if self.store.swap_account(&raw, &account)? {
                debug!("Updated account {}", account.account_id);
                return Ok(account);
            }
            debug!("CAS miss updating account {}, retrying", account_id);
        }
        Err(CatalogError::Internal(format!(
            "Concurrent update contention on account {}",
            account_id
        )))
    }

    // === Internal helpers ===

    /// Load an asset for mutation: invisible assets stay NotFound, visible
    /// but unowned ones are PermissionDenied
    fn load_mutable_asset(
        &self,
        caller: &Caller,
        asset_id: &str,
    ) -> CatalogResult<(Asset, Vec<u8>)> {
        let loaded = self.store.load_asset(asset_id)?;
        match loaded {
            Some((asset, raw)) => {
                if !can_view(&asset, caller) {
                    Err(CatalogError::asset_not_found(asset_id))
                } else if !can_mutate(&asset, caller) {
                    Err(CatalogError::PermissionDenied(format!(
                        "Only the owner may modify {}",
                        asset_id
                    )))
                } else {
                    Ok((asset, raw))
                }
            }
            None => Err(CatalogError::asset_not_found(asset_id)),
        }
    }

    /// Validate the format graph and thumbnail references against the
    /// content registry
    fn validate_references(
        &self,
        formats: &[crate::model::Format],
        thumbnail_ids: &[String],
    ) -> CatalogResult<()> {
        let mut ids = Asset::format_content_ids(formats);
        ids.extend(thumbnail_ids.iter().cloned());
        let resolved = self.store.resolve_content(&ids)?;
        validate_formats(formats, &resolved)?;
        validate_content_refs(thumbnail_ids, &resolved)
    }

    /// Scan, query, and paginate under the given scope and limits
    fn run_query(
        &self,
        caller: &Caller,
        scope: &ListingScope,
        req: &ListRequest,
        limits: PageLimits,
    ) -> CatalogResult<QueryPage> {
        let candidates = self.store.scan_assets()?;
        run_listing(
            candidates,
            scope,
            caller,
            &req.filter,
            &req.order_by,
            req.page_size,
            &req.page_token,
            limits,
        )
    }

    /// Attach the owner account map to a finished page
    fn denormalize(&self, page: QueryPage) -> CatalogResult<ListResponse> {
        let mut accounts: HashMap<String, Account> = HashMap::new();
        for asset in &page.assets {
            if accounts.contains_key(&asset.owner_id) {
                continue;
            }
            let (account, _) = self.store.load_account(&asset.owner_id)?.ok_or_else(|| {
                CatalogError::Internal(format!(
                    "Owner account missing for asset {}: {}",
                    asset.asset_id, asset.owner_id
                ))
            })?;
            accounts.insert(asset.owner_id.clone(), account);
        }
        Ok(ListResponse {
            assets: page.assets,
            next_page_token: page.next_page_token,
            total_items: page.total_items,
            accounts,
        })
    }

    /// Resolve the `"me"` sentinel to the caller's account id
    fn resolve_account_id(&self, caller: &Caller, account_id: &str) -> CatalogResult<String> {
        if account_id == ME {
            caller.account_id().map(str::to_string).ok_or_else(|| {
                CatalogError::InvalidArgument(
                    "Account \"me\" requires an authenticated caller".to_string(),
                )
            })
        } else {
            Ok(account_id.to_string())
        }
    }
}
