// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog facade
//!
//! Composes the access evaluator, query engine, and update engine into the
//! externally visible operations (create/get/update/list/delete), talks to
//! the record store, and translates internal outcomes into the public error
//! taxonomy. This is the crate's only entry point.

pub mod error;
pub mod facade;
pub mod operations;

pub use error::{CatalogError, CatalogResult};
pub use facade::Catalog;
pub use operations::{
    CreateAssetRequest, ListRequest, ListResponse, UpdateAccountRequest, UpdateAssetDataRequest,
    UpdateAssetRequest,
};
