// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Polylite - A lightweight VR asset catalog engine
//!
//! Polylite stores, queries, and mutates metadata for 3D assets (geometry,
//! materials, textures) and the accounts that own them. Assets are composed
//! of one or more formats (alternative encodings of the same logical object),
//! carry thumbnails and remix lineage, and are governed by a three-tier
//! access level (private, unlisted, public).
//!
//! # Features
//!
//! - **Access Control**: Per-request visibility decisions from access level
//!   and caller identity, with endpoint-level candidate restriction
//! - **Filtered Listing**: Conjunctive `key:value` filter grammar, stable
//!   ordering, and cursor-based pagination with opaque resumable tokens
//! - **Partial Updates**: Field-mask scoped mutations that never clobber
//!   unspecified fields, with allow-listed mask entries
//! - **Format Graph Validation**: Atomic full-format replacement validated
//!   against resolvable content elements
//! - **Embedded Storage**: Pluggable storage drivers (Sled for persistence,
//!   in-memory for testing)
//!
//! # Usage
//!
//! The [`Catalog`] facade is the only entry point. Identity resolution and
//! transport are the embedding host's concern; the facade receives a
//! resolved [`Caller`] per operation.
//!
//! ```ignore
//! let store = CatalogStore::open(StorageType::Memory, "ignored")?;
//! let catalog = Catalog::new(Arc::new(store));
//! let asset = catalog.create_asset(&Caller::account("accounts/alice"), request)?;
//! ```

// Public modules - exposed to external users
pub mod catalog;

// Internal modules - only visible within the polylite crate
pub(crate) mod access;
pub(crate) mod model;
pub(crate) mod query;
pub(crate) mod storage;
pub(crate) mod update;

// Re-export the public API - the Catalog facade is the entry point
pub use catalog::{
    Catalog, CatalogError, CatalogResult, CreateAssetRequest, ListRequest, ListResponse,
    UpdateAccountRequest, UpdateAssetDataRequest, UpdateAssetRequest,
};

// Re-export the model and identity types needed to build requests and
// inspect responses
pub use access::Caller;
pub use model::{AccessLevel, Account, Asset, CameraParams, Format, RemixInfo};
pub use update::{AccountPatch, AssetPatch};

// Re-export storage configuration for embedding hosts
pub use storage::{CatalogStore, StorageType};

/// Polylite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Polylite crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
