//! # Discogs Snarfer
//!
//! Turns Discogs release and master links found in chat messages into a
//! one-line summary built from a configurable template.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use discogs_snarfer::{ReplyContext, Snarfer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snarfer = Snarfer::with_defaults()?;
//!     let ctx = ReplyContext::new("libera", "#music");
//!
//!     let text = "check this out https://www.discogs.com/release/249504-Daft-Punk-Homework";
//!     if let Some(reply) = snarfer.handle(text, &ctx).await? {
//!         println!("{}", reply);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`link`] finds the first `release/<id>` or `master/<id>` link
//! - [`DiscogsApi`] fetches the record
//! - [`converters`] derives the template fields
//! - [`render`] fills in the template and collapses it to one line
//!
//! Template variables: `artists`, `title`, `year`, `formats`, `labels`,
//! `have`, `want`, `for_sale`. The last five are empty for masters.

pub mod api;
pub mod config;
pub mod converters;
pub mod error;
pub mod link;
pub mod models;
pub mod render;
mod snarfer;

// Main interface (recommended)
pub use snarfer::{ReplySink, Snarfer};

// Pipeline stages
pub use api::DiscogsApi;
pub use config::{ReplyContext, TemplateConfig, TemplateProvider};
pub use converters::{derive_fields, DerivedFields};
pub use error::SnarfError;
pub use link::find_link;
pub use models::{EntityKind, EntityRef, RawMetadata};
