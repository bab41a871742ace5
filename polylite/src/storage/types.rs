// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Storage driver types and error handling

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage driver type configuration
///
/// Specifies which underlying storage technology to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StorageType {
    /// Sled - Pure Rust embedded database
    /// Best for: Persistent catalogs, production use
    Sled,

    /// Memory - In-memory storage
    /// Best for: Unit testing, development
    Memory,
}

impl Default for StorageType {
    fn default() -> Self {
        StorageType::Sled
    }
}

impl std::str::FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sled" => Ok(StorageType::Sled),
            "memory" => Ok(StorageType::Memory),
            _ => Err(format!(
                "Unknown storage type: {}. Valid options: sled, memory",
                s
            )),
        }
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StorageType::Sled => "sled",
            StorageType::Memory => "memory",
        };
        write!(f, "{}", name)
    }
}

/// Error type for storage driver operations
#[derive(Error, Debug)]
pub enum StorageDriverError {
    /// I/O related errors (file system, etc.)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Record encoding/decoding failed
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Driver-specific error (Sled, etc.)
    #[error("Storage driver error: {0}")]
    BackendSpecific(String),
}

impl From<bincode::Error> for StorageDriverError {
    fn from(e: bincode::Error) -> Self {
        StorageDriverError::SerializationError(e.to_string())
    }
}

/// Result type for storage driver operations
pub type StorageResult<T> = Result<T, StorageDriverError>;
