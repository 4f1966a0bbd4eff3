// src/lib.rs

//! Typed stat extraction for sports entities scraped from semi-structured
//! stats tables.
//!
//! The crate takes raw table-row markup spanning multiple seasons and
//! multiple source tables (totals, advanced, shooting, salary, ...), merges
//! it into one fragment per season plus a `Career` aggregate, and exposes
//! the result as an [`record::EntityRecord`]: season-addressable, typed
//! field values under explicit missing/zero-default coercion policies.
//! Fetching pages and the per-sport field lists are the caller's concern; a
//! [`scheme::Scheme`] maps logical field names to CSS selectors resolved by
//! `scraper`.

pub mod contract;
pub mod extract;
pub mod record;
pub mod scheme;
pub mod utils;

// Re-export the core types for convenience
pub use contract::{parse_contract, Contract};
pub use extract::{collect_table, normalize, strip_comment_tags, SourceTable};
pub use record::coerce::{primary_score, secondary_score};
pub use record::{EntityRecord, SeasonRow, SeasonView, StatValue, Strictness};
pub use scheme::{CoercePolicy, FieldSpec, Scheme, CAREER, SEASON_FIELD};
pub use utils::error::{ExtractError, SchemeError, SelectError, StatError};
