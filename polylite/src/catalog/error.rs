// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Error taxonomy for catalog operations
//!
//! Every externally observable failure falls into one of five kinds. The
//! facade translates storage-boundary failures into `Internal`; everything
//! else is produced directly by the evaluator, query, and update engines.
//!
//! Note that a private asset the caller cannot view surfaces as `NotFound`,
//! never `PermissionDenied`, so the existence of private records does not
//! leak. `PermissionDenied` is reserved for mutation attempts on resources
//! the caller can see.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed filter/order-by grammar, unknown filter key, field-mask
    /// entry outside the allow-list, unresolvable content reference, or a
    /// structurally invalid page token
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced record does not exist, or exists but the caller may
    /// not view it
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller can view the resource but may not mutate it
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The update would violate a record invariant
    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    /// Storage failure or other unexpected condition
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// The NotFound error used for assets that are absent or invisible
    ///
    /// Both conditions must produce byte-identical errors: a caller probing
    /// for someone else's private asset learns nothing.
    pub(crate) fn asset_not_found(asset_id: &str) -> Self {
        CatalogError::NotFound(format!("Asset not found: {}", asset_id))
    }

    /// The NotFound error for a missing account
    pub(crate) fn account_not_found(account_id: &str) -> Self {
        CatalogError::NotFound(format!("Account not found: {}", account_id))
    }
}

impl From<crate::storage::StorageDriverError> for CatalogError {
    fn from(err: crate::storage::StorageDriverError) -> Self {
        CatalogError::Internal(err.to_string())
    }
}

impl From<bincode::Error> for CatalogError {
    fn from(err: bincode::Error) -> Self {
        CatalogError::Internal(format!("Serialization error: {}", err))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
