// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Request and response shapes for catalog operations
//!
//! Transport-agnostic: whatever wire format the embedding host speaks, it
//! builds these values and hands them to the [`Catalog`](super::Catalog)
//! facade together with a resolved caller identity.

use crate::model::{AccessLevel, Account, Asset, CameraParams, Format, RemixInfo};
use crate::update::{AccountPatch, AssetPatch};
use std::collections::{BTreeSet, HashMap};

/// Parameters for CreateAsset
///
/// The server assigns the asset id and creation time; the access level
/// defaults to private when unset.
#[derive(Debug, Clone, Default)]
pub struct CreateAssetRequest {
    pub display_name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub license: String,
    pub access_level: Option<AccessLevel>,
    pub formats: Vec<Format>,
    pub thumbnail_ids: Vec<String>,
    pub remix_info: Option<RemixInfo>,
    pub camera_params: Option<CameraParams>,
}

/// Parameters for UpdateAsset (field-masked metadata update)
#[derive(Debug, Clone, Default)]
pub struct UpdateAssetRequest {
    pub asset_id: String,
    pub patch: AssetPatch,
    pub update_mask: Vec<String>,
    /// Orthogonal to the mask: replaces the thumbnail sequence when present
    pub new_thumbnail_id: Option<String>,
}

/// Parameters for UpdateAssetData (full format replacement)
#[derive(Debug, Clone, Default)]
pub struct UpdateAssetDataRequest {
    pub asset_id: String,
    pub formats: Vec<Format>,
    pub thumbnail_ids: Vec<String>,
}

/// Parameters for UpdateAccount (self-service, field-masked)
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountRequest {
    /// Target account id, or the sentinel `"me"`
    pub account_id: String,
    pub patch: AccountPatch,
    pub update_mask: Vec<String>,
}

/// Parameters shared by ListAssets and ListAssetsByAccount
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    /// Conjunctive `key:value` filter string; empty means no filtering
    pub filter: String,
    /// Comma-separated sort keys; empty means the stable default order
    pub order_by: String,
    /// Zero or negative resolves to the default (100); clamped to the
    /// endpoint maximum
    pub page_size: i32,
    /// Opaque cursor from a previous response; empty means first page
    pub page_token: String,
}

/// One page of a listing, with denormalized owner accounts
#[derive(Debug, Clone)]
pub struct ListResponse {
    /// Assets on this page, in query order
    pub assets: Vec<Asset>,
    /// Cursor for the next page; empty when the listing is exhausted
    pub next_page_token: String,
    /// Size of the full filtered and authorized candidate set
    pub total_items: usize,
    /// Owner account for every distinct owner among the returned assets
    pub accounts: HashMap<String, Account>,
}
