// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Order-by string parsing and comparison
//!
//! Grammar: comma-separated field names, each optionally suffixed with
//! ` desc`. Only `create_time` is supported; unsupported fields fail
//! validation. Whatever the caller asks for, the asset id is appended as a
//! final ascending tie-break so the resulting order is total - pagination
//! correctness depends on that stability.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::model::Asset;
use std::cmp::Ordering;

/// Sortable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    CreateTime,
}

/// One sort key with direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    pub field: OrderField,
    pub descending: bool,
}

/// A parsed order-by specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    keys: Vec<OrderKey>,
}

impl OrderSpec {
    /// The default ordering when no order_by is given: newest first
    ///
    /// The contract only requires the default to be stable; newest-first
    /// matches what browsing callers expect.
    pub fn default_order() -> Self {
        Self {
            keys: vec![OrderKey {
                field: OrderField::CreateTime,
                descending: true,
            }],
        }
    }

    /// Compare two assets under this ordering
    pub fn compare(&self, a: &Asset, b: &Asset) -> Ordering {
        self.compare_position(a.create_time, &a.asset_id, b.create_time, &b.asset_id)
    }

    /// Compare two sort positions given their raw key components
    ///
    /// Also used to place a decoded page token relative to the current
    /// candidate set without materializing the original asset.
    pub fn compare_position(
        &self,
        a_time: chrono::DateTime<chrono::Utc>,
        a_id: &str,
        b_time: chrono::DateTime<chrono::Utc>,
        b_id: &str,
    ) -> Ordering {
        for key in &self.keys {
            let ord = match key.field {
                OrderField::CreateTime => a_time.cmp(&b_time),
            };
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        // Final tie-break keeps the order total regardless of the caller's
        // sort keys
        a_id.cmp(b_id)
    }
}

/// Parse an order-by string
///
/// An empty string yields the stable default ordering.
pub fn parse_order_by(order_by: &str) -> CatalogResult<OrderSpec> {
    if order_by.trim().is_empty() {
        return Ok(OrderSpec::default_order());
    }

    let mut keys = Vec::new();
    for term in order_by.split(',') {
        let term = term.trim();
        let (field_name, descending) = match term.strip_suffix(" desc") {
            Some(field) => (field.trim_end(), true),
            None => (term, false),
        };
        let field = match field_name {
            "create_time" => OrderField::CreateTime,
            other => {
                return Err(CatalogError::InvalidArgument(format!(
                    "Unsupported order_by field: {}",
                    other
                )))
            }
        };
        keys.push(OrderKey { field, descending });
    }
    Ok(OrderSpec { keys })
}
