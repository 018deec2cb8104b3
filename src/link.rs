//! Discogs link detection in message text.
//!
//! Recognises `https://www.discogs.com/.../release/<id>` and
//! `https://www.discogs.com/.../master/<id>` links, with any slug or
//! extra path segments around the keyword.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::models::{EntityKind, EntityRef};

/// Regex for matching Discogs release and master URLs.
///
/// The keyword must be a whole path segment followed by `/` and the id
/// digits. Anything after the digits (a `-Artist-Title` slug, a query)
/// is ignored.
fn discogs_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"https://(?:www\.)?discogs\.com/(?:\S*/)?(release|master)/(\d+)")
            .expect("Discogs URL regex is valid")
    })
}

/// Find the first Discogs link in `text`.
///
/// Returns `None` for text without a link; that is the common case and
/// not an error.
pub fn find_link(text: &str) -> Option<EntityRef> {
    links(text).next()
}

fn links(text: &str) -> impl Iterator<Item = EntityRef> + '_ {
    discogs_url_regex().captures_iter(text).filter_map(|cap| {
        let kind = match &cap[1] {
            "release" => EntityKind::Release,
            "master" => EntityKind::Master,
            _ => return None,
        };

        // Overflowing or zero ids are not real entries
        let id: u64 = cap[2].parse().ok().filter(|id| *id > 0)?;

        debug!(kind = %kind, id, "Matched Discogs link");
        Some(EntityRef { kind, id })
    })
}
