// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Storage boundary
//!
//! This module provides trait-based abstractions for key-value storage,
//! allowing different backends (Sled, in-memory) to be used interchangeably,
//! plus the typed record store the catalog facade talks to.
//!
//! # Architecture
//!
//! ```text
//! CatalogStore (asset/account/content records)
//!     ↓
//! StorageDriver (key-value abstraction)
//!     ↓
//! Concrete Implementations (Sled, Memory)
//! ```
//!
//! This is the only layer that performs I/O; the access, query, and update
//! engines operate purely on records loaded through it.

// Core modules
pub mod factory;
pub mod store;
pub mod traits;
pub mod types;

// Driver implementations
pub mod memory;
#[cfg(feature = "sled-backend")]
pub mod sled;

// Public API re-exports
pub use factory::create_storage_driver;
pub use store::CatalogStore;
pub use traits::{StorageDriver, StorageTree};
pub use types::{StorageDriverError, StorageResult, StorageType};
