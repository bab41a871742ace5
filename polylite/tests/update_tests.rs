//! Field-mask and format-replacement tests through the public facade

#[path = "testutils/mod.rs"]
mod testutils;

use polylite::{
    AccessLevel, AccountPatch, AssetPatch, Caller, CatalogError, Format, UpdateAccountRequest,
    UpdateAssetDataRequest, UpdateAssetRequest,
};
use testutils::test_fixture::{tag_set, TestFixture};

#[test]
fn test_masked_update_touches_only_masked_fields() {
    let fixture = TestFixture::with_two_accounts();
    let asset = fixture.create_asset("accounts/alice", "Castle", &["castle"], AccessLevel::Public);
    let alice = Caller::account("accounts/alice");

    // The patch carries a display_name too, but only description is masked
    let updated = fixture
        .catalog
        .update_asset(
            &alice,
            UpdateAssetRequest {
                asset_id: asset.asset_id.clone(),
                patch: AssetPatch {
                    description: "new".to_string(),
                    display_name: "ignored".to_string(),
                    ..Default::default()
                },
                update_mask: vec!["description".to_string()],
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.description, "new");
    assert_eq!(updated.display_name, "Castle");
    assert_eq!(updated.tags, tag_set(&["castle"]));
}

#[test]
fn test_masked_update_is_idempotent() {
    let fixture = TestFixture::with_two_accounts();
    let asset = fixture.create_asset("accounts/alice", "Castle", &[], AccessLevel::Public);
    let alice = Caller::account("accounts/alice");

    let request = UpdateAssetRequest {
        asset_id: asset.asset_id.clone(),
        patch: AssetPatch {
            tags: tag_set(&["fortress"]),
            ..Default::default()
        },
        update_mask: vec!["tags".to_string()],
        ..Default::default()
    };
    let once = fixture.catalog.update_asset(&alice, request.clone()).unwrap();
    let twice = fixture.catalog.update_asset(&alice, request).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_mask_outside_allow_list_rejected_and_nothing_applied() {
    let fixture = TestFixture::with_two_accounts();
    let asset = fixture.create_asset("accounts/alice", "Castle", &[], AccessLevel::Public);
    let alice = Caller::account("accounts/alice");

    let err = fixture
        .catalog
        .update_asset(
            &alice,
            UpdateAssetRequest {
                asset_id: asset.asset_id.clone(),
                patch: AssetPatch {
                    description: "new".to_string(),
                    ..Default::default()
                },
                update_mask: vec!["description".to_string(), "access_level".to_string()],
                ..Default::default()
            },
        )
        .unwrap_err();
    match err {
        CatalogError::InvalidArgument(msg) => assert!(msg.contains("access_level")),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }

    // No partial mutation was committed
    let reloaded = fixture.catalog.get_asset(&alice, &asset.asset_id).unwrap();
    assert_eq!(reloaded, asset);
}

#[test]
fn test_new_thumbnail_is_orthogonal_single_replace() {
    let fixture = TestFixture::with_two_accounts();
    fixture.register_content(&["content/thumb2"]);
    let asset = fixture.create_asset("accounts/alice", "Castle", &[], AccessLevel::Public);
    let alice = Caller::account("accounts/alice");

    let updated = fixture
        .catalog
        .update_asset(
            &alice,
            UpdateAssetRequest {
                asset_id: asset.asset_id.clone(),
                patch: AssetPatch {
                    description: "new".to_string(),
                    ..Default::default()
                },
                update_mask: vec!["description".to_string()],
                new_thumbnail_id: Some("content/thumb2".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.thumbnail_ids, vec!["content/thumb2".to_string()]);

    // A dangling thumbnail reference rejects the whole update
    let err = fixture
        .catalog
        .update_asset(
            &alice,
            UpdateAssetRequest {
                asset_id: asset.asset_id.clone(),
                update_mask: vec!["description".to_string()],
                new_thumbnail_id: Some("content/missing".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
}

#[test]
fn test_thumbnail_only_update_needs_no_mask() {
    let fixture = TestFixture::with_two_accounts();
    fixture.register_content(&["content/thumb2"]);
    let asset = fixture.create_asset("accounts/alice", "Castle", &[], AccessLevel::Public);
    let alice = Caller::account("accounts/alice");

    let updated = fixture
        .catalog
        .update_asset(
            &alice,
            UpdateAssetRequest {
                asset_id: asset.asset_id.clone(),
                new_thumbnail_id: Some("content/thumb2".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.thumbnail_ids, vec!["content/thumb2".to_string()]);
    // Everything else stays as it was
    assert_eq!(updated.display_name, asset.display_name);
    assert_eq!(updated.description, asset.description);

    // An update that neither masks a field nor replaces the thumbnail is
    // still malformed
    let err = fixture
        .catalog
        .update_asset(
            &alice,
            UpdateAssetRequest {
                asset_id: asset.asset_id.clone(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
}

#[test]
fn test_update_asset_data_replaces_formats_atomically() {
    let fixture = TestFixture::with_two_accounts();
    fixture.register_content(&["content/gltf"]);
    let asset = fixture.create_asset("accounts/alice", "Castle", &[], AccessLevel::Public);
    let alice = Caller::account("accounts/alice");

    let updated = fixture
        .catalog
        .update_asset_data(
            &alice,
            UpdateAssetDataRequest {
                asset_id: asset.asset_id.clone(),
                formats: vec![Format::new("GLTF2", "content/gltf")],
                thumbnail_ids: vec!["content/thumb".to_string()],
            },
        )
        .unwrap();
    assert_eq!(updated.canonical_format_type(), Some("GLTF2"));
    assert_eq!(updated.display_name, asset.display_name);

    // One dangling reference rejects the whole replacement
    let err = fixture
        .catalog
        .update_asset_data(
            &alice,
            UpdateAssetDataRequest {
                asset_id: asset.asset_id.clone(),
                formats: vec![
                    Format::new("GLTF2", "content/gltf"),
                    Format::new("OBJ", "content/missing"),
                ],
                thumbnail_ids: vec![],
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
    let reloaded = fixture.catalog.get_asset(&alice, &asset.asset_id).unwrap();
    assert_eq!(reloaded, updated);
}

#[test]
fn test_update_asset_data_rejects_empty_format_list() {
    let fixture = TestFixture::with_two_accounts();
    let asset = fixture.create_asset("accounts/alice", "Castle", &[], AccessLevel::Public);

    let err = fixture
        .catalog
        .update_asset_data(
            &Caller::account("accounts/alice"),
            UpdateAssetDataRequest {
                asset_id: asset.asset_id,
                formats: vec![],
                thumbnail_ids: vec![],
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::FailedPrecondition(_)));
}

#[test]
fn test_update_asset_data_identity_is_noop() {
    let fixture = TestFixture::with_two_accounts();
    let asset = fixture.create_asset("accounts/alice", "Castle", &["castle"], AccessLevel::Public);

    let updated = fixture
        .catalog
        .update_asset_data(
            &Caller::account("accounts/alice"),
            UpdateAssetDataRequest {
                asset_id: asset.asset_id.clone(),
                formats: asset.formats.clone(),
                thumbnail_ids: asset.thumbnail_ids.clone(),
            },
        )
        .unwrap();
    // Replacing the format list with itself changes nothing else
    assert_eq!(updated, asset);
}

#[test]
fn test_account_update_is_self_only() {
    let fixture = TestFixture::with_two_accounts();
    let alice = Caller::account("accounts/alice");

    let updated = fixture
        .catalog
        .update_account(
            &alice,
            UpdateAccountRequest {
                account_id: "me".to_string(),
                patch: AccountPatch {
                    description: "3D artist".to_string(),
                },
                update_mask: vec!["description".to_string()],
            },
        )
        .unwrap();
    assert_eq!(updated.description, "3D artist");

    // Another account's record is visible but not writable
    let err = fixture
        .catalog
        .update_account(
            &alice,
            UpdateAccountRequest {
                account_id: "accounts/bob".to_string(),
                patch: AccountPatch::default(),
                update_mask: vec!["description".to_string()],
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::PermissionDenied(_)));

    // display_name is outside the account allow-list
    let err = fixture
        .catalog
        .update_account(
            &alice,
            UpdateAccountRequest {
                account_id: "me".to_string(),
                patch: AccountPatch::default(),
                update_mask: vec!["display_name".to_string()],
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
}
