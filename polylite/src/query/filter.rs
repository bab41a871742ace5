// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Filter string parsing and predicate evaluation
//!
//! Grammar: comma-separated `key:value` pairs with AND semantics across
//! pairs. Values are matched exactly (set membership for multi-valued
//! attributes). Whitespace around `:` and `,` is trimmed.
//!
//! Escaping convention: a literal `,`, `:`, or `\` inside a key or value is
//! written `\,`, `\:`, or `\\`. Any other escape sequence, or a trailing
//! bare backslash, is rejected. Only the first unescaped `:` of a pair
//! separates key from value; later colons in the value are literal.
//!
//! Malformed pairs fail the whole request - there is no best-effort
//! filtering.

use crate::access::Caller;
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::model::Asset;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Recognized filter keys
///
/// The registry below is the single source of truth for the textual names;
/// unknown keys fail validation rather than being silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// Exact match on the owning account id
    AccountId,
    /// Membership in the asset's curation labels
    AdminTag,
    /// Membership in the asset's user tags
    Category,
    /// Exact match on the canonical format's type
    FormatType,
    /// Exact match on the license identifier
    License,
    /// Boolean: whether the caller has liked the asset
    Liked,
}

/// Key registry, resolved once at startup
static FILTER_KEYS: Lazy<HashMap<&'static str, FilterKey>> = Lazy::new(|| {
    let mut keys = HashMap::new();
    keys.insert("account_id", FilterKey::AccountId);
    keys.insert("admin_tag", FilterKey::AdminTag);
    keys.insert("category", FilterKey::Category);
    keys.insert("format_type", FilterKey::FormatType);
    keys.insert("license", FilterKey::License);
    keys.insert("liked", FilterKey::Liked);
    keys
});

/// Typed filter value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
}

/// One parsed `key:value` pair
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub key: FilterKey,
    pub value: FilterValue,
}

impl FilterClause {
    /// Evaluate this clause against an asset
    ///
    /// The caller identity is needed for the `liked` key; the engine
    /// guarantees it is authenticated before evaluation starts.
    pub fn matches(&self, asset: &Asset, caller: &Caller) -> bool {
        match (&self.key, &self.value) {
            (FilterKey::AccountId, FilterValue::Text(v)) => asset.owner_id == *v,
            (FilterKey::AdminTag, FilterValue::Text(v)) => asset.admin_tags.contains(v),
            (FilterKey::Category, FilterValue::Text(v)) => asset.tags.contains(v),
            (FilterKey::FormatType, FilterValue::Text(v)) => {
                asset.canonical_format_type() == Some(v.as_str())
            }
            (FilterKey::License, FilterValue::Text(v)) => asset.license == *v,
            (FilterKey::Liked, FilterValue::Flag(want)) => {
                let liked = caller
                    .account_id()
                    .map(|id| asset.liked_by.contains(id))
                    .unwrap_or(false);
                liked == *want
            }
            // Key/value type pairing is fixed at parse time
            _ => false,
        }
    }
}

/// Parse a raw filter string into clauses
///
/// An empty (or all-whitespace) filter string yields no clauses.
pub fn parse_filter(filter: &str) -> CatalogResult<Vec<FilterClause>> {
    if filter.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut clauses = Vec::new();
    for (raw_key, raw_value) in split_pairs(filter)? {
        let key_name = raw_key.trim();
        let value = raw_value.trim();

        let key = *FILTER_KEYS.get(key_name).ok_or_else(|| {
            CatalogError::InvalidArgument(format!("Unknown filter key: {}", key_name))
        })?;

        let value = match key {
            FilterKey::Liked => match value {
                "true" => FilterValue::Flag(true),
                "false" => FilterValue::Flag(false),
                other => {
                    return Err(CatalogError::InvalidArgument(format!(
                        "Filter key 'liked' takes a boolean, got: {}",
                        other
                    )))
                }
            },
            _ => FilterValue::Text(value.to_string()),
        };

        clauses.push(FilterClause { key, value });
    }
    Ok(clauses)
}

/// Split the filter string into (key, value) pairs, resolving escapes
///
/// Works in a single pass so escaped separators are never confused with
/// structural ones.
fn split_pairs(filter: &str) -> CatalogResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut in_value = false;

    let mut chars = filter.chars();
    loop {
        let ch = chars.next();
        match ch {
            Some('\\') => {
                let escaped = chars.next().ok_or_else(|| {
                    CatalogError::InvalidArgument(
                        "Trailing backslash in filter string".to_string(),
                    )
                })?;
                if !matches!(escaped, ',' | ':' | '\\') {
                    return Err(CatalogError::InvalidArgument(format!(
                        "Unsupported escape sequence in filter: \\{}",
                        escaped
                    )));
                }
                if in_value {
                    value.push(escaped);
                } else {
                    key.push(escaped);
                }
            }
            Some(':') if !in_value => in_value = true,
            Some(',') | None => {
                if !in_value {
                    return Err(CatalogError::InvalidArgument(format!(
                        "Malformed filter term (expected key:value): {}",
                        key.trim()
                    )));
                }
                if key.trim().is_empty() {
                    return Err(CatalogError::InvalidArgument(
                        "Empty filter key".to_string(),
                    ));
                }
                pairs.push((
                    std::mem::take(&mut key),
                    std::mem::take(&mut value),
                ));
                in_value = false;
                if ch.is_none() {
                    break;
                }
            }
            Some(other) => {
                if in_value {
                    value.push(other);
                } else {
                    key.push(other);
                }
            }
        }
    }
    Ok(pairs)
}
