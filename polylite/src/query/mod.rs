// Copyright (c) 2024-2025 Polylite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Listing query engine
//!
//! Turns a raw filter string, an order-by string, and pagination parameters
//! into a deterministic page of the visible candidate set. The engine is
//! pure: it operates on already-loaded assets and performs no storage access.
//!
//! This module provides:
//! - Conjunctive `key:value` filter grammar with a fixed key registry
//! - `create_time`-based ordering with a stable asset-id tie-break
//! - Opaque, versioned page tokens encoding the resume sort position

mod engine;
mod filter;
mod order;
mod token;

pub use engine::{run_listing, PageLimits, QueryPage};
pub use filter::{parse_filter, FilterClause, FilterKey};
pub use order::{parse_order_by, OrderSpec};
pub use token::PageToken;
