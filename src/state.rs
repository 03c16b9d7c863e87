use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use std::collections::HashSet;

use crate::favorites::Favorites;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// One catalog entry, as shown in the region list. Rebuilt from scratch
/// whenever a new region is opened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureSummary {
    pub id: u32,
    pub name: String,
    pub sprite_url: String,
}

/// Full record for the detail screen. Height and weight stay in the
/// upstream native units (decimeters / hectograms); conversion happens
/// at render time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureDetail {
    pub id: u32,
    pub name: String,
    pub sprite_url: String,
    pub types: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub description: String,
    pub moves: Vec<String>,
    pub evolution_chain_url: Option<String>,
}

impl CreatureDetail {
    pub fn height_meters(&self) -> f32 {
        self.height as f32 / 10.0
    }

    pub fn weight_kilograms(&self) -> f32 {
        self.weight as f32 / 10.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub id: u32,
    pub name: String,
    pub sprite_url: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Home,
    Catalog,
    Detail,
    Favorites,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub screen: Screen,
    pub locale: String,

    pub regions: Vec<String>,
    pub region_index: usize,
    pub region: Option<String>,

    pub catalog: Vec<CreatureSummary>,
    pub filtered_indices: Vec<usize>,
    pub selected_index: usize,

    pub search: SearchState,
    pub type_list: Vec<String>,
    /// Highlighted chip in the type row; 0 is the "all" chip, `n` is
    /// `type_list[n - 1]`.
    pub type_cursor: usize,
    pub type_filter: Option<String>,
    /// `None` while no member set has been resolved for the active filter
    /// (fetch pending); `Some` with an empty set means zero matches.
    pub type_members: Option<HashSet<String>>,

    /// Target of the detail screen; completions for any other query are
    /// stale and get dropped.
    pub detail_query: Option<String>,
    pub detail: Option<CreatureDetail>,
    pub detail_origin: Screen,
    pub evolutions: Vec<EvolutionNode>,
    pub evolution_index: usize,

    pub favorites: Favorites,
    pub favorites_index: usize,
    pub favorites_loaded: bool,

    pub region_loading: bool,
    pub list_loading: bool,
    pub type_loading: bool,
    pub detail_loading: bool,
    pub evolution_loading: bool,
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
            screen: Screen::Home,
            locale: "es".to_string(),
            regions: Vec::new(),
            region_index: 0,
            region: None,
            catalog: Vec::new(),
            filtered_indices: Vec::new(),
            selected_index: 0,
            search: SearchState::default(),
            type_list: Vec::new(),
            type_cursor: 0,
            type_filter: None,
            type_members: None,
            detail_query: None,
            detail: None,
            detail_origin: Screen::Catalog,
            evolutions: Vec::new(),
            evolution_index: 0,
            favorites: Favorites::default(),
            favorites_index: 0,
            favorites_loaded: false,
            region_loading: false,
            list_loading: false,
            type_loading: false,
            detail_loading: false,
            evolution_loading: false,
            message: None,
        }
    }
}

impl AppState {
    pub fn selected_entry(&self) -> Option<&CreatureSummary> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|idx| self.catalog.get(*idx))
    }

    pub fn selected_name(&self) -> Option<String> {
        self.selected_entry().map(|entry| entry.name.clone())
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    /// Recompute the visible slice of the catalog in one pass: substring
    /// match on the name, intersected with the member set of the active
    /// type filter. An active filter whose member set has not resolved
    /// yet yields an empty result until the set arrives.
    pub fn rebuild_filtered(&mut self) {
        let query = self.search.query.trim().to_lowercase();
        self.filtered_indices = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                let matches_query =
                    query.is_empty() || entry.name.to_lowercase().contains(&query);
                let matches_type = match (&self.type_filter, &self.type_members) {
                    (None, _) => true,
                    (Some(_), Some(members)) => members.contains(&entry.name),
                    (Some(_), None) => false,
                };
                matches_query && matches_type
            })
            .map(|(idx, _)| idx)
            .collect();

        if self.selected_index >= self.filtered_indices.len() {
            self.selected_index = 0;
        }
    }

    pub fn highlighted_type(&self) -> Option<&str> {
        if self.type_cursor == 0 {
            return None;
        }
        self.type_list
            .get(self.type_cursor - 1)
            .map(String::as_str)
    }

    pub fn current_region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn is_detail_favorite(&self) -> bool {
        self.detail
            .as_ref()
            .map(|detail| self.favorites.is_favorite(&detail.id.into()))
            .unwrap_or(false)
    }

    pub fn selected_evolution(&self) -> Option<&EvolutionNode> {
        self.evolutions.get(self.evolution_index)
    }

    pub fn reset_catalog(&mut self) {
        self.catalog.clear();
        self.filtered_indices.clear();
        self.selected_index = 0;
        self.search = SearchState::default();
        self.type_cursor = 0;
        self.type_filter = None;
        self.type_members = None;
        self.type_loading = false;
    }

    pub fn reset_detail(&mut self) {
        self.detail_query = None;
        self.detail = None;
        self.detail_loading = false;
        self.evolutions.clear();
        self.evolution_index = 0;
        self.evolution_loading = false;
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("screen", ron_string(&self.screen))
                .entry("region", ron_string(&self.region))
                .entry("total", ron_string(&self.catalog.len()))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("selected", ron_string(&self.selected_index)),
            DebugSection::new("Filters")
                .entry("search", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active))
                .entry("type", ron_string(&self.type_filter))
                .entry(
                    "members",
                    ron_string(&self.type_members.as_ref().map(HashSet::len)),
                ),
            DebugSection::new("Detail")
                .entry("query", ron_string(&self.detail_query))
                .entry("loaded", ron_string(&self.detail.is_some()))
                .entry("evolutions", ron_string(&self.evolutions.len())),
            DebugSection::new("Favorites")
                .entry("count", ron_string(&self.favorites.len()))
                .entry("loaded", ron_string(&self.favorites_loaded)),
            DebugSection::new("Status")
                .entry("list_loading", ron_string(&self.list_loading))
                .entry("type_loading", ron_string(&self.type_loading))
                .entry("detail_loading", ron_string(&self.detail_loading))
                .entry("evolution_loading", ron_string(&self.evolution_loading))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
