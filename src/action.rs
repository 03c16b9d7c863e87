use serde::{Deserialize, Serialize};

use crate::favorites::FavoriteEntry;
use crate::state::{CreatureDetail, CreatureSummary, EvolutionNode};

/// Completion actions carry the input that triggered the fetch so the
/// reducer can drop results whose trigger is no longer current.
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    RegionsDidLoad(Vec<String>),
    RegionSelect(usize),
    RegionOpen,

    CatalogDidLoad {
        region: String,
        entries: Vec<CreatureSummary>,
    },
    CatalogSelect(usize),
    SelectionMove(i16),
    SelectionPage(i16),

    TypesDidLoad(Vec<String>),
    TypeCursorMove(i16),
    TypeToggle,
    TypeFilterClear,
    TypeMembersDidLoad {
        name: String,
        members: Vec<String>,
    },

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    DetailOpen,
    DetailDidLoad {
        query: String,
        detail: Option<CreatureDetail>,
    },
    EvolutionsDidLoad {
        url: String,
        nodes: Vec<EvolutionNode>,
    },
    EvolutionSelect(usize),
    EvolutionOpen,

    ToggleFavorite,
    FavoritesOpen,
    FavoriteSelect(usize),
    FavoriteOpen,
    FavoriteRemove,
    FavoritesDidLoad(Vec<FavoriteEntry>),
    FavoritesDidPersist,
    FavoritesPersistDidError(String),

    Back,
    UiTerminalResize(u16, u16),
    Quit,
}
