use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::favorites::{FavoriteCandidate, FavoriteEntry, FavoriteId, Favorites};
use crate::state::{AppState, Screen};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.region_loading = true;
            state.type_loading = true;
            state.message = None;
            DispatchResult::changed_with_many(vec![
                Effect::LoadRegions,
                Effect::LoadTypes,
                Effect::LoadFavorites,
            ])
        }

        Action::RegionsDidLoad(regions) => {
            state.region_loading = false;
            state.regions = regions;
            if state.region_index >= state.regions.len() {
                state.region_index = 0;
            }
            DispatchResult::changed()
        }

        Action::RegionSelect(index) => {
            if state.regions.is_empty() {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(state.regions.len() - 1);
            if bounded == state.region_index {
                return DispatchResult::unchanged();
            }
            state.region_index = bounded;
            DispatchResult::changed()
        }

        Action::RegionOpen => {
            let Some(region) = state.regions.get(state.region_index).cloned() else {
                return DispatchResult::unchanged();
            };
            state.region = Some(region.clone());
            state.screen = Screen::Catalog;
            state.reset_catalog();
            state.list_loading = true;
            state.message = None;
            DispatchResult::changed_with(Effect::LoadCatalog { region })
        }

        // Late completions for a region the user already left are dropped.
        Action::CatalogDidLoad { region, entries } => {
            if state.region.as_deref() != Some(region.as_str()) {
                return DispatchResult::unchanged();
            }
            state.list_loading = false;
            state.catalog = entries;
            state.rebuild_filtered();
            if state.catalog.is_empty() {
                state.message = Some(format!("No creatures for {region}."));
            }
            DispatchResult::changed()
        }

        Action::CatalogSelect(index) => {
            if state.screen != Screen::Catalog {
                return DispatchResult::unchanged();
            }
            if !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => match state.screen {
            Screen::Catalog => {
                let mut index = state.selected_index as i16 + delta;
                if index < 0 {
                    index = 0;
                }
                if !state.set_selected_index(index as usize) {
                    return DispatchResult::unchanged();
                }
                DispatchResult::changed()
            }
            Screen::Favorites => move_favorite_selection(state, delta),
            Screen::Home | Screen::Detail => DispatchResult::unchanged(),
        },

        Action::SelectionPage(delta) => {
            if state.screen != Screen::Catalog {
                return DispatchResult::unchanged();
            }
            let page = list_page_size(state) as i16;
            let mut index = state.selected_index as i16 + delta * page;
            if index < 0 {
                index = 0;
            }
            if !state.set_selected_index(index as usize) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::TypesDidLoad(types) => {
            state.type_loading = false;
            state.type_list = types;
            if state.type_cursor > state.type_list.len() {
                state.type_cursor = 0;
            }
            DispatchResult::changed()
        }

        Action::TypeCursorMove(delta) => {
            if state.type_list.is_empty() {
                return DispatchResult::unchanged();
            }
            let max = state.type_list.len() as i16;
            let mut next = state.type_cursor as i16 + delta;
            if next < 0 {
                next = max;
            } else if next > max {
                next = 0;
            }
            if next as usize == state.type_cursor {
                return DispatchResult::unchanged();
            }
            state.type_cursor = next as usize;
            DispatchResult::changed()
        }

        Action::TypeToggle => toggle_type(state),

        Action::TypeFilterClear => {
            if state.type_filter.is_none() {
                return DispatchResult::unchanged();
            }
            clear_type_filter(state);
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // A member set for anything but the currently active filter is
        // stale; this also covers the user clearing the filter mid-fetch.
        Action::TypeMembersDidLoad { name, members } => {
            if state.type_filter.as_deref() != Some(name.as_str()) {
                return DispatchResult::unchanged();
            }
            state.type_loading = false;
            state.type_members = Some(members.into_iter().collect());
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            state.search.query.pop();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::DetailOpen => {
            let Some(name) = state.selected_name() else {
                return DispatchResult::unchanged();
            };
            open_detail(state, name, Screen::Catalog)
        }

        Action::DetailDidLoad { query, detail } => {
            if state.detail_query.as_deref() != Some(query.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail_loading = false;
            match detail {
                Some(detail) => {
                    let chain_url = detail.evolution_chain_url.clone();
                    state.detail = Some(detail);
                    state.message = None;
                    if let Some(url) = chain_url {
                        state.evolution_loading = true;
                        return DispatchResult::changed_with(Effect::LoadEvolutions { url });
                    }
                    DispatchResult::changed()
                }
                None => {
                    state.detail = None;
                    state.message = Some(format!("No data available for {query}."));
                    DispatchResult::changed()
                }
            }
        }

        Action::EvolutionsDidLoad { url, nodes } => {
            let current_url = state
                .detail
                .as_ref()
                .and_then(|detail| detail.evolution_chain_url.as_deref());
            if current_url != Some(url.as_str()) {
                return DispatchResult::unchanged();
            }
            state.evolution_loading = false;
            state.evolutions = nodes;
            state.evolution_index = state
                .detail
                .as_ref()
                .and_then(|detail| {
                    state
                        .evolutions
                        .iter()
                        .position(|node| node.id == detail.id)
                })
                .unwrap_or(0);
            DispatchResult::changed()
        }

        Action::EvolutionSelect(index) => {
            if state.evolutions.is_empty() {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(state.evolutions.len() - 1);
            if bounded == state.evolution_index {
                return DispatchResult::unchanged();
            }
            state.evolution_index = bounded;
            DispatchResult::changed()
        }

        Action::EvolutionOpen => {
            let Some(node) = state.selected_evolution() else {
                return DispatchResult::unchanged();
            };
            if state
                .detail
                .as_ref()
                .is_some_and(|detail| detail.id == node.id)
            {
                return DispatchResult::unchanged();
            }
            let name = node.name.clone();
            let origin = state.detail_origin;
            open_detail(state, name, origin)
        }

        Action::ToggleFavorite => {
            let Some(candidate) = favorite_candidate(state) else {
                return DispatchResult::unchanged();
            };
            let id = match candidate.clone().normalize() {
                Some(entry) => entry.id,
                None => return DispatchResult::unchanged(),
            };
            let changed = if state.favorites.is_favorite(&id) {
                state.favorites.remove(&id)
            } else {
                state.favorites.add(candidate)
            };
            if !changed {
                return DispatchResult::unchanged();
            }
            if state.favorites_index >= state.favorites.len() && state.favorites_index > 0 {
                state.favorites_index = state.favorites.len().saturating_sub(1);
            }
            DispatchResult::changed_with(persist_effect(&state.favorites))
        }

        Action::FavoritesOpen => {
            if state.screen == Screen::Favorites {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::Favorites;
            state.favorites_index = state
                .favorites_index
                .min(state.favorites.len().saturating_sub(1));
            DispatchResult::changed()
        }

        Action::FavoriteSelect(index) => {
            if state.favorites.is_empty() {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(state.favorites.len() - 1);
            if bounded == state.favorites_index {
                return DispatchResult::unchanged();
            }
            state.favorites_index = bounded;
            DispatchResult::changed()
        }

        Action::FavoriteOpen => {
            let Some(entry) = state.favorites.entries().get(state.favorites_index) else {
                return DispatchResult::unchanged();
            };
            let query = entry.id.key();
            open_detail(state, query, Screen::Favorites)
        }

        Action::FavoriteRemove => {
            let Some(entry) = state.favorites.entries().get(state.favorites_index) else {
                return DispatchResult::unchanged();
            };
            let id = entry.id.clone();
            if !state.favorites.remove(&id) {
                return DispatchResult::unchanged();
            }
            if state.favorites_index >= state.favorites.len() && state.favorites_index > 0 {
                state.favorites_index = state.favorites.len() - 1;
            }
            DispatchResult::changed_with(persist_effect(&state.favorites))
        }

        Action::FavoritesDidLoad(entries) => {
            state.favorites = Favorites::from_entries(entries);
            state.favorites_loaded = true;
            state.favorites_index = 0;
            DispatchResult::changed()
        }

        Action::FavoritesDidPersist => DispatchResult::unchanged(),

        Action::FavoritesPersistDidError(error) => {
            state.message = Some(format!("Favorites save error: {error}"));
            DispatchResult::changed()
        }

        Action::Back => match state.screen {
            Screen::Home => DispatchResult::unchanged(),
            Screen::Catalog => {
                state.screen = Screen::Home;
                state.region = None;
                state.reset_catalog();
                state.list_loading = false;
                state.message = None;
                DispatchResult::changed()
            }
            Screen::Detail => {
                state.screen = state.detail_origin;
                state.reset_detail();
                state.message = None;
                DispatchResult::changed()
            }
            Screen::Favorites => {
                state.screen = if state.region.is_some() {
                    Screen::Catalog
                } else {
                    Screen::Home
                };
                DispatchResult::changed()
            }
        },

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Toggle the highlighted type chip. Re-selecting the active filter (or
/// the "all" chip) clears it; anything else resets the member set and
/// kicks off its fetch, leaving the list in the pending state until the
/// members arrive.
fn toggle_type(state: &mut AppState) -> DispatchResult<Effect> {
    let highlighted = state.highlighted_type().map(str::to_string);
    match highlighted {
        None => {
            if state.type_filter.is_none() {
                return DispatchResult::unchanged();
            }
            clear_type_filter(state);
            state.rebuild_filtered();
            DispatchResult::changed()
        }
        Some(name) if state.type_filter.as_deref() == Some(name.as_str()) => {
            clear_type_filter(state);
            state.rebuild_filtered();
            DispatchResult::changed()
        }
        Some(name) => {
            state.type_filter = Some(name.clone());
            state.type_members = None;
            state.type_loading = true;
            state.rebuild_filtered();
            DispatchResult::changed_with(Effect::LoadTypeMembers { name })
        }
    }
}

fn clear_type_filter(state: &mut AppState) {
    state.type_filter = None;
    state.type_members = None;
    state.type_loading = false;
}

fn open_detail(state: &mut AppState, query: String, origin: Screen) -> DispatchResult<Effect> {
    state.reset_detail();
    state.screen = Screen::Detail;
    state.detail_origin = origin;
    state.detail_query = Some(query.clone());
    state.detail_loading = true;
    state.message = None;
    DispatchResult::changed_with(Effect::LoadDetail {
        query,
        locale: state.locale.clone(),
    })
}

fn favorite_candidate(state: &AppState) -> Option<FavoriteCandidate> {
    match state.screen {
        Screen::Detail => state
            .detail
            .as_ref()
            .map(|detail| FavoriteCandidate::Detail(detail.clone())),
        Screen::Catalog => state.selected_entry().map(|entry| {
            FavoriteCandidate::Entry(FavoriteEntry {
                id: FavoriteId::Number(entry.id),
                name: entry.name.clone(),
                sprite_url: Some(entry.sprite_url.clone()),
                types: Vec::new(),
            })
        }),
        Screen::Home | Screen::Favorites => None,
    }
}

fn move_favorite_selection(state: &mut AppState, delta: i16) -> DispatchResult<Effect> {
    if state.favorites.is_empty() {
        return DispatchResult::unchanged();
    }
    let mut index = state.favorites_index as i16 + delta;
    if index < 0 {
        index = 0;
    }
    let bounded = (index as usize).min(state.favorites.len() - 1);
    if bounded == state.favorites_index {
        return DispatchResult::unchanged();
    }
    state.favorites_index = bounded;
    DispatchResult::changed()
}

fn persist_effect(favorites: &Favorites) -> Effect {
    Effect::PersistFavorites {
        entries: favorites.entries().to_vec(),
    }
}

fn list_page_size(state: &AppState) -> usize {
    state.terminal_size.1.saturating_sub(8) as usize
}
