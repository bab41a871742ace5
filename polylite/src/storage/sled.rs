// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Sled storage driver implementation

use super::traits::{StorageDriver, StorageTree};
use super::types::{StorageDriverError, StorageResult, StorageType};
use std::path::Path;

/// Sled driver implementation
pub struct SledDriver {
    db: sled::Db,
}

/// Sled tree wrapper that implements the StorageTree trait
pub struct SledTree {
    tree: sled::Tree,
}

impl StorageTree for SledTree {
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.tree
            .insert(key, value)
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.tree
            .get(key)
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))
            .map(|opt| opt.map(|v| v.to_vec()))
    }

    fn remove(&self, key: &[u8]) -> StorageResult<()> {
        self.tree
            .remove(key)
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))?;
        Ok(())
    }

    fn contains_key(&self, key: &[u8]) -> StorageResult<bool> {
        self.tree
            .contains_key(key)
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))
    }

    fn compare_and_swap(
        &self,
        key: &[u8],
        old: Option<&[u8]>,
        new: Option<&[u8]>,
    ) -> StorageResult<bool> {
        let outcome = self
            .tree
            .compare_and_swap(key, old, new)
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))?;
        // The inner error carries the mismatched current value; the caller
        // only needs to know the swap did not happen
        Ok(outcome.is_ok())
    }

    fn clear(&self) -> StorageResult<()> {
        self.tree
            .clear()
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))
    }

    fn iter(
        &self,
    ) -> StorageResult<Box<dyn Iterator<Item = StorageResult<(Vec<u8>, Vec<u8>)>> + '_>> {
        let iter = self.tree.iter().map(|entry| {
            entry
                .map(|(k, v)| (k.to_vec(), v.to_vec()))
                .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))
        });
        Ok(Box::new(iter))
    }

    fn flush(&self) -> StorageResult<()> {
        self.tree
            .flush()
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))?;
        Ok(())
    }
}

impl StorageDriver for SledDriver {
    type Tree = Box<dyn StorageTree>;

    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let db = sled::open(path).map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))?;
        Ok(Self { db })
    }

    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree> {
        let tree = self
            .db
            .open_tree(name)
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))?;
        Ok(Box::new(SledTree { tree }) as Box<dyn StorageTree>)
    }

    fn list_trees(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .db
            .tree_names()
            .iter()
            .map(|name| String::from_utf8_lossy(name).to_string())
            .collect())
    }

    fn flush(&self) -> StorageResult<()> {
        self.db
            .flush()
            .map_err(|e| StorageDriverError::BackendSpecific(e.to_string()))?;
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Sled
    }
}
