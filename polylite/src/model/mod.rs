// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog data model
//!
//! This module provides:
//! - Asset and account record types
//! - Format descriptions anchoring the content-element dependency graph
//! - The three-tier access level enum

mod access_level;
mod account;
mod asset;

pub use access_level::AccessLevel;
pub use account::Account;
pub use asset::{Asset, CameraParams, Format, RemixInfo};
