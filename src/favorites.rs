//! Persisted favorites: identity normalization and the keyed store.
//!
//! Candidates reach the store in three shapes (an entry that was already
//! normalized, a full detail record, or a raw upstream-shaped record);
//! normalization reduces all of them to `FavoriteEntry` or rejects them
//! when no id can be resolved.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api;
use crate::state::CreatureDetail;

/// Favorite identity. Persisted documents written by older builds carry
/// numeric ids, newer ones may carry name strings; comparison is always
/// by the string form so `6` and `"6"` collapse to one entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FavoriteId {
    Number(u32),
    Text(String),
}

impl FavoriteId {
    pub fn key(&self) -> String {
        match self {
            FavoriteId::Number(id) => id.to_string(),
            FavoriteId::Text(id) => id.clone(),
        }
    }
}

impl PartialEq for FavoriteId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FavoriteId {}

impl From<u32> for FavoriteId {
    fn from(id: u32) -> Self {
        FavoriteId::Number(id)
    }
}

impl From<&str> for FavoriteId {
    fn from(id: &str) -> Self {
        FavoriteId::Text(id.to_string())
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: FavoriteId,
    pub name: String,
    #[serde(default)]
    pub sprite_url: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// The three accepted input shapes for a favorite toggle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FavoriteCandidate {
    Entry(FavoriteEntry),
    Detail(CreatureDetail),
    Raw(RawFavorite),
}

impl FavoriteCandidate {
    pub fn normalize(self) -> Option<FavoriteEntry> {
        match self {
            FavoriteCandidate::Entry(entry) => Some(entry),
            FavoriteCandidate::Detail(detail) => Some(FavoriteEntry {
                id: FavoriteId::Number(detail.id),
                name: detail.name,
                sprite_url: Some(detail.sprite_url),
                types: detail.types,
            }),
            FavoriteCandidate::Raw(raw) => raw.normalize(),
        }
    }
}

/// Upstream-shaped record from a caller that skipped normalization.
/// Sprites and type slots keep their raw JSON shape; the fields are
/// probed in a fixed order, first non-empty wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFavorite {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub species: Option<SpeciesRef>,
    pub sprites: Value,
    pub types: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesRef {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl RawFavorite {
    /// Id priority: own `id` field, then the species locator's trailing
    /// segment, then the species name as a string id. No match rejects
    /// the candidate.
    fn resolve_id(&self) -> Option<FavoriteId> {
        if let Some(id) = self.id {
            return Some(FavoriteId::Number(id));
        }
        let species = self.species.as_ref()?;
        if let Some(id) = species.url.as_deref().and_then(api::id_from_url) {
            return Some(FavoriteId::Number(id));
        }
        species
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(FavoriteId::from)
    }

    fn normalize(self) -> Option<FavoriteEntry> {
        let id = self.resolve_id()?;
        let name = self
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| self.species.as_ref().and_then(|species| species.name.clone()))
            .unwrap_or_default();
        let sprite_url = match &id {
            FavoriteId::Number(num) => Some(api::sprite_url(*num)),
            FavoriteId::Text(_) => sprite_from_value(&self.sprites),
        };
        let types = types_from_value(&self.types);
        Some(FavoriteEntry {
            id,
            name,
            sprite_url,
            types,
        })
    }
}

fn sprite_from_value(value: &Value) -> Option<String> {
    ["/other/official-artwork/front_default", "/front_default"]
        .iter()
        .find_map(|pointer| pointer_string(value, pointer))
}

fn pointer_string(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

/// Type lists arrive either as plain strings or as upstream type slots.
fn types_from_value(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            item.as_str().map(|text| text.to_string()).or_else(|| {
                item.pointer("/type/name")
                    .and_then(|val| val.as_str())
                    .map(|text| text.to_string())
            })
        })
        .collect()
}

/// Persisted documents from older builds mix normalized entries with raw
/// upstream records. Values carrying the raw markers (`sprites`,
/// `species`) go through raw normalization; everything else is read as a
/// normalized entry. Values resolving no id are dropped.
pub fn entries_from_document(values: Vec<Value>) -> Vec<FavoriteEntry> {
    values.into_iter().filter_map(entry_from_value).collect()
}

fn entry_from_value(value: Value) -> Option<FavoriteEntry> {
    let looks_raw = value.get("sprites").is_some() || value.get("species").is_some();
    if !looks_raw {
        if let Ok(entry) = serde_json::from_value::<FavoriteEntry>(value.clone()) {
            return Some(entry);
        }
    }
    let raw: RawFavorite = serde_json::from_value(value).ok()?;
    raw.normalize()
}

/// Insertion-ordered collection, unique by string-coerced id. Owned by
/// the application state; the reducer is the only mutation point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    /// Rebuild from a persisted document, keeping the first occurrence of
    /// each id in case an older build wrote duplicates.
    pub fn from_entries(entries: Vec<FavoriteEntry>) -> Self {
        let mut favorites = Favorites::default();
        for entry in entries {
            if !favorites.is_favorite(&entry.id) {
                favorites.entries.push(entry);
            }
        }
        favorites
    }

    /// Normalize and insert. Returns whether the collection changed:
    /// rejected candidates and already-present ids are no-ops.
    pub fn add(&mut self, candidate: FavoriteCandidate) -> bool {
        let Some(entry) = candidate.normalize() else {
            return false;
        };
        if self.is_favorite(&entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Drop every entry matching the id; absent ids are a no-op.
    pub fn remove(&mut self, id: &FavoriteId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != *id);
        self.entries.len() != before
    }

    pub fn is_favorite(&self, id: &FavoriteId) -> bool {
        self.entries.iter().any(|entry| entry.id == *id)
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
