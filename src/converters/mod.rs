//! Payload to reply-field converters.
//!
//! Turns a decoded [`RawMetadata`] record into the fixed set of
//! [`DerivedFields`] a reply template can reference.

use serde::Serialize;

use crate::models::common::display_opt;
use crate::models::{ArtistCredit, EntityKind, NamedEntry, RawMetadata};

/// Format name Discogs uses as a catch-all; never shown.
const ALL_MEDIA: &str = "All Media";

/// Template variable names, in the order they are documented.
pub const FIELD_NAMES: [&str; 8] = [
    "artists", "title", "year", "formats", "labels", "have", "want", "for_sale",
];

/// Display fields derived from one release or master.
///
/// `formats`, `labels`, `have`, `want` and `for_sale` are only filled for
/// [`EntityKind::Release`]; for masters they are always empty strings, even
/// when the payload carries the corresponding keys. Build values through
/// [`derive_fields`] to keep that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedFields {
    pub artists: String,
    pub title: String,
    pub year: String,
    pub formats: String,
    pub labels: String,
    pub have: String,
    pub want: String,
    pub for_sale: String,
}

/// Derive reply fields from a payload.
pub fn derive_fields(kind: EntityKind, data: &RawMetadata) -> DerivedFields {
    let mut fields = DerivedFields {
        artists: join_artists(&data.artists),
        title: data.title_text(),
        year: data.year_text(),
        ..Default::default()
    };

    if kind == EntityKind::Release {
        fields.formats = unique_names(&data.formats).join("+");
        fields.labels = unique_names(&data.labels).join("/");
        if let Some(community) = &data.community {
            fields.have = display_opt(community.have.as_ref());
            fields.want = display_opt(community.want.as_ref());
        }
        fields.for_sale = display_opt(data.num_for_sale.as_ref());
    }

    fields
}

/// Concatenate artist credits as `"<name> <join> "` per credit.
///
/// The trailing space and the double space left by an empty join phrase
/// are kept; reply normalization collapses them.
pub fn join_artists(credits: &[ArtistCredit]) -> String {
    let mut artists = String::new();
    for credit in credits {
        let name = credit.name.as_deref().unwrap_or("");
        let join = credit.join_text().unwrap_or("").replace("Featuring", "ft.");
        artists.push_str(name);
        artists.push(' ');
        artists.push_str(&join);
        artists.push(' ');
    }
    artists
}

/// Distinct entry names in first-seen order, without the "All Media" marker.
///
/// Entries with no name are skipped.
pub fn unique_names(entries: &[NamedEntry]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for name in entries.iter().filter_map(|e| e.name.as_deref()) {
        if name != ALL_MEDIA && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
