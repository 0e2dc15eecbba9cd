//! Outline data model
//!
//! A [`Module`] is the single canonical record used everywhere in the crate. It
//! serializes with the fixed field names downstream consumers expect (`module`,
//! `Description`, `Submodules`) and accepts the lowercase spellings on input, so
//! producers are normalized once at the boundary.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Submodule name → description, in discovery order
pub type Submodules = IndexMap<String, String>;

/// A documented concept on the target site, with its named sub-concepts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module name; the dedup key across a whole run
    #[serde(rename = "module")]
    pub name: String,

    /// Free-text description, possibly empty before normalization
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,

    /// Submodules in discovery order
    #[serde(
        rename = "Submodules",
        alias = "submodules",
        default,
        deserialize_with = "deserialize_submodules"
    )]
    pub submodules: Submodules,
}

impl Module {
    /// Creates a module with no submodules
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            submodules: Submodules::new(),
        }
    }

    /// Adds a submodule only if the name is not already present
    ///
    /// Returns true if the submodule was inserted.
    pub fn add_submodule(&mut self, name: impl Into<String>, description: impl Into<String>) -> bool {
        match self.submodules.entry(name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(description.into());
                true
            }
        }
    }

    /// Inserts or overwrites a submodule
    pub fn set_submodule(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.submodules.insert(name.into(), description.into());
    }
}

/// A (name, description) pair proposed by an extraction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub description: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A fetched page, immutable once handed to extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Canonical URL (fragment stripped)
    pub url: String,
    /// Decoded body, at most the first 300,000 bytes
    pub html: String,
}

/// Reads a submodule map whose values may be any JSON scalar
///
/// Strings are kept as-is, `null` becomes an empty description, and numbers,
/// booleans or nested values are rendered with their JSON text.
fn deserialize_submodules<'de, D>(deserializer: D) -> Result<Submodules, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| {
            let description = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (name, description)
        })
        .collect())
}
