//! Test fixture for polylite integration tests
//!
//! Provides isolated catalog instances over the in-memory storage backend.
//! Tests drive the public Catalog facade only; accounts and content
//! elements are seeded through the store's provisioning surface, standing
//! in for the out-of-scope identity and upload layers.

use polylite::{
    AccessLevel, Asset, Caller, Catalog, CatalogStore, CreateAssetRequest, Format,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Test fixture with an isolated catalog instance
pub struct TestFixture {
    pub catalog: Catalog,
}

impl TestFixture {
    /// Create an empty in-memory catalog
    pub fn empty() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let store = CatalogStore::in_memory().expect("Failed to open in-memory store");
        Self {
            catalog: Catalog::new(Arc::new(store)),
        }
    }

    /// Create a catalog pre-seeded with two accounts and shared content
    ///
    /// Seeds `accounts/alice` and `accounts/bob`, plus the content elements
    /// used by [`Self::asset_request`].
    pub fn with_two_accounts() -> Self {
        let fixture = Self::empty();
        fixture.provision_account("accounts/alice", "Alice");
        fixture.provision_account("accounts/bob", "Bob");
        fixture.register_content(&["content/root", "content/mtl", "content/thumb"]);
        fixture
    }

    /// Seed an account record, as the identity layer would
    pub fn provision_account(&self, account_id: &str, display_name: &str) {
        self.catalog
            .store()
            .upsert_account(&polylite::Account::new(account_id, display_name))
            .expect("Failed to provision account");
    }

    /// Apply curation labels to an asset, as operator tooling would
    pub fn apply_admin_tags(&self, asset_id: &str, labels: &[&str]) {
        let applied = self
            .catalog
            .store()
            .set_admin_tags(asset_id, tag_set(labels))
            .expect("Failed to set admin tags");
        assert!(applied, "Asset missing while applying admin tags");
    }

    /// Register content element ids, as the upload layer would
    pub fn register_content(&self, content_ids: &[&str]) {
        for id in content_ids {
            self.catalog
                .store()
                .register_content(id)
                .expect("Failed to register content");
        }
    }

    /// A well-formed create request over the seeded content elements
    pub fn asset_request(display_name: &str, tags: &[&str], level: AccessLevel) -> CreateAssetRequest {
        let mut format = Format::new("OBJ", "content/root");
        format.resource_ids.insert("content/mtl".to_string());
        CreateAssetRequest {
            display_name: display_name.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            access_level: Some(level),
            formats: vec![format],
            thumbnail_ids: vec!["content/thumb".to_string()],
            ..Default::default()
        }
    }

    /// Create an asset owned by the given account
    pub fn create_asset(
        &self,
        owner: &str,
        display_name: &str,
        tags: &[&str],
        level: AccessLevel,
    ) -> Asset {
        self.catalog
            .create_asset(&Caller::account(owner), Self::asset_request(display_name, tags, level))
            .expect("Failed to create asset")
    }

    /// Create `n` public assets owned by the given account
    pub fn create_public_assets(&self, owner: &str, n: usize) -> Vec<Asset> {
        (0..n)
            .map(|i| {
                self.create_asset(owner, &format!("Asset {:03}", i), &[], AccessLevel::Public)
            })
            .collect()
    }
}

/// Tags helper for building patch values
pub fn tag_set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|s| s.to_string()).collect()
}
