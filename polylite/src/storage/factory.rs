// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Storage driver factory
//!
//! Factory functions for creating storage drivers based on configuration.

use super::traits::{StorageDriver, StorageTree};
use super::types::{StorageResult, StorageType};
use std::path::Path;

/// Factory function to create a storage driver based on configuration
///
/// This is the main entry point for creating storage drivers. It takes a
/// storage type and path, then returns the appropriate driver implementation
/// as a trait object.
///
/// # Arguments
/// * `storage_type` - The type of storage driver to create (Sled, Memory)
/// * `path` - The filesystem path for the database (ignored by Memory)
pub fn create_storage_driver<P: AsRef<Path>>(
    storage_type: StorageType,
    path: P,
) -> StorageResult<Box<dyn StorageDriver<Tree = Box<dyn StorageTree>>>> {
    match storage_type {
        #[cfg(feature = "sled-backend")]
        StorageType::Sled => {
            use crate::storage::sled::SledDriver;
            let driver = SledDriver::open(path)?;
            Ok(Box::new(driver) as Box<dyn StorageDriver<Tree = Box<dyn StorageTree>>>)
        }
        #[cfg(not(feature = "sled-backend"))]
        StorageType::Sled => Err(super::types::StorageDriverError::BackendSpecific(
            "Sled storage backend not compiled in (enable the sled-backend feature)".to_string(),
        )),
        StorageType::Memory => {
            use crate::storage::memory::MemoryStorageDriver;
            let driver = MemoryStorageDriver::open(path)?;
            Ok(Box::new(driver) as Box<dyn StorageDriver<Tree = Box<dyn StorageTree>>>)
        }
    }
}
