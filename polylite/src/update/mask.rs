// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Field-mask application
//!
//! A mask is a capability-scoped merge: only allow-listed field names may be
//! touched, `*` means all of them, and anything else fails loudly naming the
//! offending entry. Masked values are copied verbatim from the patch - an
//! explicit empty string or empty set is a legitimate "clear this field"
//! instruction. Unmasked fields are never read from the patch.
//!
//! Immutable fields (ids, owner, create_time) and `access_level` are not in
//! the allow-lists and therefore unreachable through this path.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::model::{Account, Asset};
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// Patch values for an asset metadata update
///
/// Only fields reachable through the asset mask allow-list appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPatch {
    pub display_name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
}

/// Patch values for an account self-service update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub description: String,
}

/// One allow-listed field: its accepted names and the copy closure
struct MaskField<T, P> {
    names: &'static [&'static str],
    apply: fn(&mut T, &P),
}

/// Asset mask allow-list, resolved once at startup
static ASSET_MASK_FIELDS: Lazy<Vec<MaskField<Asset, AssetPatch>>> = Lazy::new(|| {
    vec![
        MaskField {
            names: &["name", "display_name"],
            apply: |asset, patch| asset.display_name = patch.display_name.clone(),
        },
        MaskField {
            names: &["description"],
            apply: |asset, patch| asset.description = patch.description.clone(),
        },
        MaskField {
            names: &["tag", "tags"],
            apply: |asset, patch| asset.tags = patch.tags.clone(),
        },
    ]
});

/// Account mask allow-list, resolved once at startup
static ACCOUNT_MASK_FIELDS: Lazy<Vec<MaskField<Account, AccountPatch>>> = Lazy::new(|| {
    vec![MaskField {
        names: &["description"],
        apply: |account, patch| account.description = patch.description.clone(),
    }]
});

/// Apply a field-masked patch to an asset
pub fn apply_asset_mask(asset: &mut Asset, patch: &AssetPatch, mask: &[String]) -> CatalogResult<()> {
    apply_mask(asset, patch, mask, &ASSET_MASK_FIELDS)
}

/// Apply a field-masked patch to an account
pub fn apply_account_mask(
    account: &mut Account,
    patch: &AccountPatch,
    mask: &[String],
) -> CatalogResult<()> {
    apply_mask(account, patch, mask, &ACCOUNT_MASK_FIELDS)
}

/// Replace the thumbnail sequence with a single content reference
///
/// Orthogonal to the field mask: single-thumbnail replace, not append.
pub fn replace_thumbnail(asset: &mut Asset, thumbnail_id: &str) {
    asset.thumbnail_ids = vec![thumbnail_id.to_string()];
}

fn apply_mask<T, P>(
    target: &mut T,
    patch: &P,
    mask: &[String],
    fields: &[MaskField<T, P>],
) -> CatalogResult<()> {
    if mask.is_empty() {
        return Err(CatalogError::InvalidArgument(
            "Update mask must name at least one field".to_string(),
        ));
    }

    // Validate every entry before touching the target, so a bad mask never
    // half-applies
    let mut appliers: Vec<fn(&mut T, &P)> = Vec::new();
    for entry in mask {
        let entry = entry.trim();
        if entry == "*" {
            appliers.extend(fields.iter().map(|f| f.apply));
            continue;
        }
        let field = fields
            .iter()
            .find(|f| f.names.contains(&entry))
            .ok_or_else(|| {
                CatalogError::InvalidArgument(format!("Unsupported update mask field: {}", entry))
            })?;
        appliers.push(field.apply);
    }

    for apply in appliers {
        apply(target, patch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccessLevel, Format};

    fn base_asset() -> Asset {
        Asset {
            asset_id: "assets/1".to_string(),
            owner_id: "accounts/alice".to_string(),
            display_name: "Castle".to_string(),
            description: "A castle".to_string(),
            tags: ["castle", "medieval"].iter().map(|s| s.to_string()).collect(),
            admin_tags: BTreeSet::new(),
            license: String::new(),
            access_level: AccessLevel::Public,
            formats: vec![Format::new("OBJ", "content/root")],
            thumbnail_ids: vec!["content/thumb".to_string()],
            remix_info: None,
            camera_params: None,
            liked_by: BTreeSet::new(),
            create_time: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_masked_field_applied_unmasked_untouched() {
        let mut asset = base_asset();
        let patch = AssetPatch {
            description: "new".to_string(),
            display_name: "ignored".to_string(),
            ..Default::default()
        };
        apply_asset_mask(&mut asset, &patch, &["description".to_string()]).unwrap();
        assert_eq!(asset.description, "new");
        assert_eq!(asset.display_name, "Castle");
    }

    #[test]
    fn test_field_name_aliases() {
        let mut asset = base_asset();
        let patch = AssetPatch {
            display_name: "Fortress".to_string(),
            ..Default::default()
        };
        apply_asset_mask(&mut asset, &patch, &["name".to_string()]).unwrap();
        assert_eq!(asset.display_name, "Fortress");
    }

    #[test]
    fn test_wildcard_applies_all_allow_listed_fields() {
        let mut asset = base_asset();
        let patch = AssetPatch {
            display_name: "Fortress".to_string(),
            description: "A fortress".to_string(),
            tags: ["fortress"].iter().map(|s| s.to_string()).collect(),
        };
        apply_asset_mask(&mut asset, &patch, &["*".to_string()]).unwrap();
        assert_eq!(asset.display_name, "Fortress");
        assert_eq!(asset.description, "A fortress");
        assert!(asset.tags.contains("fortress"));
    }

    #[test]
    fn test_empty_values_clear_fields() {
        let mut asset = base_asset();
        let patch = AssetPatch::default();
        apply_asset_mask(
            &mut asset,
            &patch,
            &["description".to_string(), "tags".to_string()],
        )
        .unwrap();
        assert_eq!(asset.description, "");
        assert!(asset.tags.is_empty());
    }

    #[test]
    fn test_unknown_and_immutable_entries_rejected() {
        let mut asset = base_asset();
        let patch = AssetPatch::default();
        for entry in ["owner_id", "access_level", "create_time", "bogus"] {
            let err =
                apply_asset_mask(&mut asset, &patch, &[entry.to_string()]).unwrap_err();
            match err {
                CatalogError::InvalidArgument(msg) => assert!(msg.contains(entry)),
                other => panic!("expected InvalidArgument, got {:?}", other),
            }
        }
        // Target untouched after rejections
        assert_eq!(asset.display_name, "Castle");
    }

    #[test]
    fn test_bad_entry_anywhere_applies_nothing() {
        let mut asset = base_asset();
        let patch = AssetPatch {
            description: "new".to_string(),
            ..Default::default()
        };
        let mask = vec!["description".to_string(), "bogus".to_string()];
        assert!(apply_asset_mask(&mut asset, &patch, &mask).is_err());
        assert_eq!(asset.description, "A castle");
    }

    #[test]
    fn test_empty_mask_rejected() {
        let mut asset = base_asset();
        let err = apply_asset_mask(&mut asset, &AssetPatch::default(), &[]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
    }

    #[test]
    fn test_mask_application_is_idempotent() {
        let mut once = base_asset();
        let mut twice = once.clone();
        let patch = AssetPatch {
            description: "updated".to_string(),
            ..Default::default()
        };
        let mask = vec!["description".to_string()];
        apply_asset_mask(&mut once, &patch, &mask).unwrap();
        apply_asset_mask(&mut twice, &patch, &mask).unwrap();
        apply_asset_mask(&mut twice, &patch, &mask).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_account_mask() {
        let mut account = Account::new("accounts/alice", "Alice");
        let patch = AccountPatch {
            description: "3D artist".to_string(),
        };
        apply_account_mask(&mut account, &patch, &["description".to_string()]).unwrap();
        assert_eq!(account.description, "3D artist");

        let err = apply_account_mask(&mut account, &patch, &["display_name".to_string()])
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
    }

    #[test]
    fn test_replace_thumbnail_is_single_replace() {
        let mut asset = base_asset();
        asset.thumbnail_ids = vec!["content/a".to_string(), "content/b".to_string()];
        replace_thumbnail(&mut asset, "content/new");
        assert_eq!(asset.thumbnail_ids, vec!["content/new".to_string()]);
    }
}
