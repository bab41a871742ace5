// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Selective update engine
//!
//! Applies field-mask-scoped partial updates to assets and accounts without
//! clobbering unspecified fields, and validates the format/resource
//! dependency graph before a format replacement is committed. All of it is
//! pure: the facade fetches whatever store state is needed first and
//! persists atomically afterwards.

mod formats;
mod mask;

pub use formats::{replace_formats, validate_content_refs, validate_formats};
pub use mask::{apply_account_mask, apply_asset_mask, replace_thumbnail, AccountPatch, AssetPatch};
