// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Asset and format records

use super::AccessLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A catalog asset
///
/// An asset is one logical 3D object owned by exactly one account. It is
/// composed of one or more formats; the first format is canonical and
/// determines the asset's primary format type for filtering purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier, server-assigned at creation, never reused
    pub asset_id: String,

    /// Owning account, immutable after creation
    pub owner_id: String,

    /// Human-readable display name
    pub display_name: String,

    /// Free-form description
    pub description: String,

    /// User-supplied tags; `category:` filters match against these
    pub tags: BTreeSet<String>,

    /// Curation labels applied by catalog operators; `admin_tag:` filters
    /// match against these
    pub admin_tags: BTreeSet<String>,

    /// License identifier, opaque to the engine
    pub license: String,

    /// Visibility tier
    pub access_level: AccessLevel,

    /// Alternative encodings of the asset; non-empty, first is canonical
    pub formats: Vec<Format>,

    /// Content references for thumbnail images, in display order
    pub thumbnail_ids: Vec<String>,

    /// Back-reference to the asset this one was remixed from
    pub remix_info: Option<RemixInfo>,

    /// Default rendering parameters, opaque to the engine
    pub camera_params: Option<CameraParams>,

    /// Accounts that liked this asset; backs the `liked:` filter
    pub liked_by: BTreeSet<String>,

    /// Creation timestamp, immutable, primary sort key for listings
    pub create_time: chrono::DateTime<chrono::Utc>,
}

impl Asset {
    /// The format type of the canonical (first) format
    pub fn canonical_format_type(&self) -> Option<&str> {
        self.formats.first().map(|f| f.format_type.as_str())
    }

    /// All content element ids referenced by the format graph
    ///
    /// Covers every root and dependent resource across all formats; used to
    /// batch existence checks before validation.
    pub fn format_content_ids(formats: &[Format]) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        for format in formats {
            ids.insert(format.root_id.clone());
            ids.extend(format.resource_ids.iter().cloned());
        }
        ids
    }
}

/// One encoding of an asset
///
/// A format anchors a dependency graph: the root content element (e.g. an
/// OBJ file) plus the dependent resources it references (e.g. MTL files,
/// textures). Complexity and scale are descriptive metadata the engine
/// stores but does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Format {
    /// Encoding identifier, e.g. "OBJ", "GLTF2", "TILT"
    pub format_type: String,

    /// Root content element of this encoding
    pub root_id: String,

    /// Dependent content elements referenced by the root
    pub resource_ids: BTreeSet<String>,

    /// Descriptive complexity metadata (e.g. triangle count), not validated
    pub format_complexity: Option<String>,

    /// Descriptive scale metadata, not validated
    pub format_scale: Option<String>,
}

impl Format {
    /// Create a format with no dependent resources
    pub fn new(format_type: impl Into<String>, root_id: impl Into<String>) -> Self {
        Self {
            format_type: format_type.into(),
            root_id: root_id.into(),
            resource_ids: BTreeSet::new(),
            format_complexity: None,
            format_scale: None,
        }
    }
}

/// Remix lineage back-reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemixInfo {
    /// The asset this one was derived from
    pub source_asset_id: String,
}

/// Default rendering parameters attached to an asset
///
/// Stored and returned verbatim; the engine performs no validation beyond
/// serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    /// Orienting rotation quaternion (x, y, z, w)
    pub orienting_rotation: Option<[f64; 4]>,

    /// Suggested vertical field of view in degrees
    pub fov_y_degrees: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_format_type_is_first() {
        let asset = Asset {
            asset_id: "assets/1".to_string(),
            owner_id: "accounts/a".to_string(),
            display_name: "Castle".to_string(),
            description: String::new(),
            tags: BTreeSet::new(),
            admin_tags: BTreeSet::new(),
            license: String::new(),
            access_level: AccessLevel::default(),
            formats: vec![Format::new("OBJ", "content/root"), Format::new("GLTF2", "content/alt")],
            thumbnail_ids: vec![],
            remix_info: None,
            camera_params: None,
            liked_by: BTreeSet::new(),
            create_time: chrono::Utc::now(),
        };
        assert_eq!(asset.canonical_format_type(), Some("OBJ"));
    }

    #[test]
    fn test_format_content_ids_cover_roots_and_resources() {
        let mut format = Format::new("OBJ", "content/root");
        format.resource_ids.insert("content/mtl".to_string());
        format.resource_ids.insert("content/tex".to_string());
        let ids = Asset::format_content_ids(&[format, Format::new("GLTF2", "content/alt")]);
        let expected: BTreeSet<String> = ["content/root", "content/mtl", "content/tex", "content/alt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ids, expected);
    }
}
