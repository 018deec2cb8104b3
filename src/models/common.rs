//! Common types shared across all models.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kind of catalog entry a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A concrete pressing or edition.
    Release,
    /// The master record grouping all versions of a release.
    Master,
}

impl EntityKind {
    /// The keyword used in site URLs and configuration keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Release => "release",
            EntityKind::Master => "master",
        }
    }

    /// The collection name used in API paths.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Release => "releases",
            EntityKind::Master => "masters",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(EntityKind::Release),
            "master" => Ok(EntityKind::Master),
            other => Err(format!("unknown entity kind: {}", other)),
        }
    }
}

/// A recognised link: entity kind plus its positive numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: u64,
}

impl EntityRef {
    /// Create a reference to a release.
    pub fn release(id: u64) -> Self {
        Self {
            kind: EntityKind::Release,
            id,
        }
    }

    /// Create a reference to a master.
    pub fn master(id: u64) -> Self {
        Self {
            kind: EntityKind::Master,
            id,
        }
    }

    /// Canonical site URL for this entry.
    pub fn site_url(&self) -> String {
        format!("https://www.discogs.com/{}/{}", self.kind, self.id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Render a scalar from the payload the way it should appear in a reply.
///
/// Strings pass through, numbers and booleans use their JSON spelling and
/// null becomes empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Display an optional scalar, absent meaning empty.
pub(crate) fn display_opt(value: Option<&Value>) -> String {
    value.map(display_value).unwrap_or_default()
}

/// Deserialize a field, turning a value of the wrong shape into `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize a list, dropping elements that do not fit `T`.
///
/// Anything other than an array yields an empty list.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
