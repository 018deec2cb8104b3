//! Release and master payload models.
//!
//! The API serves releases and masters with overlapping shapes, so a single
//! record covers both. Every field is optional: anything absent or of an
//! unexpected type decodes to `None` or an empty list instead of failing.

use serde::Deserialize;
use serde_json::Value;

use super::common::{display_opt, lenient, lenient_list};

/// One artist credit in an entry's `artists` list.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ArtistCredit {
    /// Credited artist name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Phrase joining this credit to the next one (e.g. "Featuring", "&").
    #[serde(default, deserialize_with = "lenient")]
    pub join: Option<String>,

    /// Alternate spelling of `join`, used only when `join` is absent.
    #[serde(default, rename = "joinPhrase", deserialize_with = "lenient")]
    pub join_phrase: Option<String>,
}

impl ArtistCredit {
    /// Create a credit with a name and optional join phrase.
    pub fn new<S: Into<String>>(name: S, join: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            join: join.map(str::to_string),
            join_phrase: None,
        }
    }

    /// The join phrase, preferring `join` over `joinPhrase`.
    pub fn join_text(&self) -> Option<&str> {
        self.join.as_deref().or(self.join_phrase.as_deref())
    }
}

/// An entry of the `formats` or `labels` lists; only the name is read.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NamedEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Collection statistics of a release.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Community {
    #[serde(default)]
    pub have: Option<Value>,

    #[serde(default)]
    pub want: Option<Value>,
}

/// A release or master record as returned by the API.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawMetadata {
    /// Credited artists in display order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub artists: Vec<ArtistCredit>,

    #[serde(default)]
    pub title: Option<Value>,

    #[serde(default)]
    pub year: Option<Value>,

    /// Release formats (CD, Vinyl, ...). Not used for masters.
    #[serde(default, deserialize_with = "lenient_list")]
    pub formats: Vec<NamedEntry>,

    /// Labels the release came out on. Not used for masters.
    #[serde(default, deserialize_with = "lenient_list")]
    pub labels: Vec<NamedEntry>,

    #[serde(default, deserialize_with = "lenient")]
    pub community: Option<Community>,

    /// Number of copies currently listed for sale.
    #[serde(default)]
    pub num_for_sale: Option<Value>,
}

impl RawMetadata {
    /// Title as display text.
    pub fn title_text(&self) -> String {
        display_opt(self.title.as_ref())
    }

    /// Year as display text.
    pub fn year_text(&self) -> String {
        display_opt(self.year.as_ref())
    }
}
