// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Opaque page token codec
//!
//! A page token encodes the sort-key values of the last item returned plus
//! its asset id as tie-break - never a raw row offset, so the cursor stays
//! meaningful when items are concurrently inserted or deleted ahead of it.
//!
//! The token is versioned and fingerprinted against the filter/order strings
//! that produced it; resuming a different query with a stale token is
//! rejected, and any decode failure surfaces as InvalidArgument, never a
//! panic.

use crate::catalog::error::{CatalogError, CatalogResult};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Current token layout version
const TOKEN_VERSION: u8 = 1;

/// Decoded pagination cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken {
    version: u8,

    /// CRC32 over the filter and order strings of the originating query
    fingerprint: u32,

    /// Microsecond timestamp of the last returned item's create_time
    pub create_time_micros: i64,

    /// Asset id of the last returned item (the ordering tie-break)
    pub asset_id: String,
}

impl PageToken {
    /// Build the cursor pointing just past the given item
    pub fn after(
        filter: &str,
        order_by: &str,
        create_time: chrono::DateTime<chrono::Utc>,
        asset_id: &str,
    ) -> Self {
        Self {
            version: TOKEN_VERSION,
            fingerprint: query_fingerprint(filter, order_by),
            create_time_micros: create_time.timestamp_micros(),
            asset_id: asset_id.to_string(),
        }
    }

    /// The create_time this cursor points at
    pub fn create_time(&self) -> CatalogResult<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_micros(self.create_time_micros).ok_or_else(|| {
            CatalogError::InvalidArgument("Invalid page token: timestamp out of range".to_string())
        })
    }

    /// Serialize to the opaque wire form
    pub fn encode(&self) -> CatalogResult<String> {
        let bytes = bincode::serialize(self)
            .map_err(|e| CatalogError::Internal(format!("Failed to encode page token: {}", e)))?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    /// Decode an opaque token, checking version and query fingerprint
    pub fn decode(token: &str, filter: &str, order_by: &str) -> CatalogResult<Self> {
        let bytes = general_purpose::STANDARD
            .decode(token)
            .map_err(|e| CatalogError::InvalidArgument(format!("Invalid page token: {}", e)))?;
        let decoded: PageToken = bincode::deserialize(&bytes)
            .map_err(|e| CatalogError::InvalidArgument(format!("Invalid page token: {}", e)))?;
        if decoded.version != TOKEN_VERSION {
            return Err(CatalogError::InvalidArgument(format!(
                "Unsupported page token version: {}",
                decoded.version
            )));
        }
        if decoded.fingerprint != query_fingerprint(filter, order_by) {
            return Err(CatalogError::InvalidArgument(
                "Page token does not match this query's filter/order_by".to_string(),
            ));
        }
        Ok(decoded)
    }
}

/// Fingerprint the query parameters a token belongs to
fn query_fingerprint(filter: &str, order_by: &str) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(filter.as_bytes());
    hasher.update(&[0]);
    hasher.update(order_by.as_bytes());
    hasher.finalize()
}
