//! Data models for Discogs links and API responses.
//!
//! This module contains the entity reference produced by link matching
//! and the lenient payload records the API response is decoded into.

pub mod common;
pub mod release;

// Re-exports for convenience
pub use common::{display_value, EntityKind, EntityRef};
pub use release::{ArtistCredit, Community, NamedEntry, RawMetadata};
