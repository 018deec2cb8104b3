//! API client for Discogs.
//!
//! [`DiscogsApi`] fetches release and master records from the public
//! database API (no auth required).

pub mod client;

pub use client::{DiscogsApi, API_BASE_URL, USER_AGENT};
