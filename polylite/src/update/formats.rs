// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Format graph validation and replacement
//!
//! A format replacement swaps the entire format list, never merges. Before
//! anything is committed, every root and dependent resource reference in the
//! new list must resolve to an existing content element; one dangling
//! reference rejects the whole operation.
//!
//! Validation is pure: the facade pre-fetches the set of resolvable content
//! ids and passes it in, keeping this module free of storage access.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::model::{Asset, Format};
use std::collections::BTreeSet;

/// Validate a replacement format list against resolvable content ids
///
/// `resolved` holds every content id known to exist among those referenced.
pub fn validate_formats(formats: &[Format], resolved: &BTreeSet<String>) -> CatalogResult<()> {
    if formats.is_empty() {
        return Err(CatalogError::FailedPrecondition(
            "An asset must retain at least one format".to_string(),
        ));
    }
    for format in formats {
        if !resolved.contains(&format.root_id) {
            return Err(CatalogError::InvalidArgument(format!(
                "Format root does not resolve to a content element: {}",
                format.root_id
            )));
        }
        for resource_id in &format.resource_ids {
            if !resolved.contains(resource_id) {
                return Err(CatalogError::InvalidArgument(format!(
                    "Format resource does not resolve to a content element: {}",
                    resource_id
                )));
            }
        }
    }
    Ok(())
}

/// Validate a flat list of content references (e.g. thumbnail ids)
pub fn validate_content_refs(ids: &[String], resolved: &BTreeSet<String>) -> CatalogResult<()> {
    for id in ids {
        if !resolved.contains(id) {
            return Err(CatalogError::InvalidArgument(format!(
                "Reference does not resolve to a content element: {}",
                id
            )));
        }
    }
    Ok(())
}

/// Swap in a validated format list and thumbnail sequence
///
/// Callers must have run [`validate_formats`] (and
/// [`validate_content_refs`] for the thumbnails) first; this function only
/// performs the swap so the read-modify-write stays a single step.
pub fn replace_formats(asset: &mut Asset, formats: Vec<Format>, thumbnail_ids: Vec<String>) {
    asset.formats = formats;
    asset.thumbnail_ids = thumbnail_ids;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_format_list_is_failed_precondition() {
        let err = validate_formats(&[], &resolved(&[])).unwrap_err();
        assert!(matches!(err, CatalogError::FailedPrecondition(_)));
    }

    #[test]
    fn test_all_references_resolve() {
        let mut format = Format::new("OBJ", "content/root");
        format.resource_ids.insert("content/mtl".to_string());
        assert!(validate_formats(
            &[format],
            &resolved(&["content/root", "content/mtl"])
        )
        .is_ok());
    }

    #[test]
    fn test_dangling_root_rejected() {
        let format = Format::new("OBJ", "content/missing");
        let err = validate_formats(&[format], &resolved(&[])).unwrap_err();
        match err {
            CatalogError::InvalidArgument(msg) => assert!(msg.contains("content/missing")),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_resource_rejected() {
        let mut format = Format::new("OBJ", "content/root");
        format.resource_ids.insert("content/missing".to_string());
        let err = validate_formats(&[format], &resolved(&["content/root"])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
    }

    #[test]
    fn test_thumbnail_refs_validated() {
        let ids = vec!["content/thumb".to_string()];
        assert!(validate_content_refs(&ids, &resolved(&["content/thumb"])).is_ok());
        assert!(validate_content_refs(&ids, &resolved(&[])).is_err());
    }
}
