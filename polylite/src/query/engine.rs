// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Listing pipeline: filter, authorize, order, paginate
//!
//! Visibility is applied before totals and tokens are computed, so neither
//! `total_items` nor cursor positions can leak the existence of records the
//! caller may not see.

use super::filter::{parse_filter, FilterKey};
use super::order::parse_order_by;
use super::token::PageToken;
use crate::access::{can_view, Caller, ListingScope};
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::model::Asset;
use std::cmp::Ordering;

/// Per-endpoint pagination bounds
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    /// Effective size when the caller passes zero or negative
    pub default_size: usize,
    /// Hard ceiling; larger requests are clamped, never rejected
    pub max_size: usize,
}

/// One deterministic page of a listing
#[derive(Debug, Clone)]
pub struct QueryPage {
    /// Assets on this page, in query order
    pub assets: Vec<Asset>,
    /// Cursor for the next page; empty when this page reaches the end
    pub next_page_token: String,
    /// Size of the full filtered and authorized candidate set
    pub total_items: usize,
}

/// Run a listing query over the loaded candidate assets
///
/// Steps: parse the filter and order-by strings, drop everything the scope
/// or `can_view` excludes, apply the filter conjunction, sort into the total
/// order, then cut the page the token points at.
#[allow(clippy::too_many_arguments)]
pub fn run_listing(
    candidates: Vec<Asset>,
    scope: &ListingScope,
    caller: &Caller,
    filter: &str,
    order_by: &str,
    page_size: i32,
    page_token: &str,
    limits: PageLimits,
) -> CatalogResult<QueryPage> {
    let clauses = parse_filter(filter)?;

    // The liked key has no referent without an authenticated caller
    if caller.account_id().is_none()
        && clauses.iter().any(|c| c.key == FilterKey::Liked)
    {
        return Err(CatalogError::InvalidArgument(
            "Filter key 'liked' requires an authenticated caller".to_string(),
        ));
    }

    let order = parse_order_by(order_by)?;

    let effective_size = if page_size <= 0 {
        limits.default_size
    } else {
        (page_size as usize).min(limits.max_size)
    };

    // Endpoint-level candidate restriction, then per-item visibility as a
    // second check, then the filter conjunction
    let mut visible: Vec<Asset> = candidates
        .into_iter()
        .filter(|asset| scope.admits(asset, caller))
        .filter(|asset| can_view(asset, caller))
        .filter(|asset| clauses.iter().all(|clause| clause.matches(asset, caller)))
        .collect();

    visible.sort_by(|a, b| order.compare(a, b));
    let total_items = visible.len();

    // Resume strictly after the token's sort position. Items that vanished
    // ahead of the cursor shift the set without duplicating or skipping
    // anything that is still present.
    let start = if page_token.is_empty() {
        0
    } else {
        let token = PageToken::decode(page_token, filter, order_by)?;
        let token_time = token.create_time()?;
        visible
            .iter()
            .position(|asset| {
                order.compare_position(
                    asset.create_time,
                    &asset.asset_id,
                    token_time,
                    &token.asset_id,
                ) == Ordering::Greater
            })
            .unwrap_or(total_items)
    };

    let end = (start + effective_size).min(total_items);
    let page: Vec<Asset> = visible[start..end].to_vec();

    let next_page_token = if end < total_items {
        // page is non-empty here: end > start whenever end < total
        let last = &page[page.len() - 1];
        PageToken::after(filter, order_by, last.create_time, &last.asset_id).encode()?
    } else {
        String::new()
    };

    Ok(QueryPage {
        assets: page,
        next_page_token,
        total_items,
    })
}
