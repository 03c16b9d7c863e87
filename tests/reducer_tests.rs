//! Reducer tests driving the store directly: navigation, staleness
//! guards, filter semantics, and favorites mutations.

use tui_dispatch::EffectStore;
use regiodex::{
    action::Action,
    api,
    effect::Effect,
    favorites::{FavoriteEntry, FavoriteId},
    reducer::reducer,
    state::{AppState, CreatureDetail, CreatureSummary, EvolutionNode, Screen},
};

fn summary(id: u32, name: &str) -> CreatureSummary {
    CreatureSummary {
        id,
        name: name.to_string(),
        sprite_url: api::sprite_url(id),
    }
}

fn detail(id: u32, name: &str, chain_url: Option<&str>) -> CreatureDetail {
    CreatureDetail {
        id,
        name: name.to_string(),
        sprite_url: api::sprite_url(id),
        types: vec!["electric".to_string()],
        height: 4,
        weight: 60,
        description: "A creature.".to_string(),
        moves: vec!["thunder-shock".to_string()],
        evolution_chain_url: chain_url.map(str::to_string),
    }
}

fn node(id: u32, name: &str) -> EvolutionNode {
    EvolutionNode {
        id,
        name: name.to_string(),
        sprite_url: api::sprite_url(id),
    }
}

fn catalog_state() -> AppState {
    let mut state = AppState {
        screen: Screen::Catalog,
        region: Some("kanto".to_string()),
        ..AppState::default()
    };
    state.catalog = vec![
        summary(25, "pikachu"),
        summary(26, "raichu"),
        summary(1, "bulbasaur"),
    ];
    state.type_list = vec!["electric".to_string(), "grass".to_string()];
    state.rebuild_filtered();
    state
}

#[test]
fn init_loads_regions_types_and_favorites() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::Init);
    assert!(result.changed);
    assert_eq!(result.effects.len(), 3);
    assert!(matches!(result.effects[0], Effect::LoadRegions));
    assert!(matches!(result.effects[1], Effect::LoadTypes));
    assert!(matches!(result.effects[2], Effect::LoadFavorites));
}

#[test]
fn region_open_switches_screen_and_fetches_catalog() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::RegionsDidLoad(api::region_names()));
    store.dispatch(Action::RegionSelect(1));

    let result = store.dispatch(Action::RegionOpen);
    assert_eq!(store.state().screen, Screen::Catalog);
    assert_eq!(store.state().region.as_deref(), Some("johto"));
    assert!(store.state().list_loading);
    assert!(
        matches!(&result.effects[0], Effect::LoadCatalog { region } if region == "johto")
    );
}

#[test]
fn catalog_completion_for_stale_region_is_discarded() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::RegionsDidLoad(api::region_names()));
    store.dispatch(Action::RegionOpen);

    // The user switched regions before the first fetch resolved.
    store.dispatch(Action::RegionSelect(1));
    store.dispatch(Action::RegionOpen);

    let stale = store.dispatch(Action::CatalogDidLoad {
        region: "kanto".to_string(),
        entries: vec![summary(25, "pikachu")],
    });
    assert!(!stale.changed);
    assert!(store.state().catalog.is_empty());

    let current = store.dispatch(Action::CatalogDidLoad {
        region: "johto".to_string(),
        entries: vec![summary(152, "chikorita")],
    });
    assert!(current.changed);
    assert_eq!(store.state().catalog.len(), 1);
    assert!(!store.state().list_loading);
}

#[test]
fn type_toggle_fetches_members_and_retoggle_clears() {
    let mut store = EffectStore::new(catalog_state(), reducer);

    store.dispatch(Action::TypeCursorMove(1));
    let result = store.dispatch(Action::TypeToggle);
    assert_eq!(store.state().type_filter.as_deref(), Some("electric"));
    assert!(store.state().type_members.is_none());
    assert!(store.state().type_loading);
    assert!(
        matches!(&result.effects[0], Effect::LoadTypeMembers { name } if name == "electric")
    );
    // Members pending: the filter is active but nothing matches yet.
    assert!(store.state().filtered_indices.is_empty());

    let result = store.dispatch(Action::TypeToggle);
    assert!(result.changed);
    assert!(result.effects.is_empty());
    assert!(store.state().type_filter.is_none());
    assert!(store.state().type_members.is_none());
    assert_eq!(store.state().filtered_indices.len(), 3);
}

#[test]
fn type_members_apply_only_for_active_filter() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::TypeCursorMove(1));
    store.dispatch(Action::TypeToggle);

    let stale = store.dispatch(Action::TypeMembersDidLoad {
        name: "grass".to_string(),
        members: vec!["bulbasaur".to_string()],
    });
    assert!(!stale.changed);
    assert!(store.state().type_members.is_none());

    store.dispatch(Action::TypeMembersDidLoad {
        name: "electric".to_string(),
        members: vec!["pikachu".to_string(), "raichu".to_string()],
    });
    assert!(!store.state().type_loading);
    assert_eq!(store.state().filtered_indices.len(), 2);
}

#[test]
fn search_intersects_with_type_members() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::TypeCursorMove(1));
    store.dispatch(Action::TypeToggle);
    store.dispatch(Action::TypeMembersDidLoad {
        name: "electric".to_string(),
        members: vec!["pikachu".to_string(), "raichu".to_string()],
    });

    store.dispatch(Action::SearchStart);
    for ch in "pika".chars() {
        store.dispatch(Action::SearchInput(ch));
    }
    store.dispatch(Action::SearchSubmit);

    let state = store.state();
    let names: Vec<_> = state
        .filtered_indices
        .iter()
        .map(|idx| state.catalog[*idx].name.as_str())
        .collect();
    assert_eq!(names, vec!["pikachu"]);
}

#[test]
fn detail_open_and_load_with_evolutions() {
    let mut store = EffectStore::new(catalog_state(), reducer);

    let result = store.dispatch(Action::DetailOpen);
    assert_eq!(store.state().screen, Screen::Detail);
    assert!(store.state().detail_loading);
    assert!(matches!(
        &result.effects[0],
        Effect::LoadDetail { query, .. } if query == "pikachu"
    ));

    let chain = "https://pokeapi.co/api/v2/evolution-chain/10/";
    let result = store.dispatch(Action::DetailDidLoad {
        query: "pikachu".to_string(),
        detail: Some(detail(25, "pikachu", Some(chain))),
    });
    assert!(!store.state().detail_loading);
    assert!(store.state().evolution_loading);
    assert!(matches!(&result.effects[0], Effect::LoadEvolutions { url } if url == chain));

    store.dispatch(Action::EvolutionsDidLoad {
        url: chain.to_string(),
        nodes: vec![node(172, "pichu"), node(25, "pikachu"), node(26, "raichu")],
    });
    assert_eq!(store.state().evolutions.len(), 3);
    // Selection snaps to the creature being shown.
    assert_eq!(store.state().evolution_index, 1);
}

#[test]
fn stale_detail_and_evolution_completions_are_discarded() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::DetailOpen);

    let stale = store.dispatch(Action::DetailDidLoad {
        query: "raichu".to_string(),
        detail: Some(detail(26, "raichu", None)),
    });
    assert!(!stale.changed);
    assert!(store.state().detail.is_none());

    store.dispatch(Action::DetailDidLoad {
        query: "pikachu".to_string(),
        detail: Some(detail(25, "pikachu", Some("chain-a"))),
    });
    let stale = store.dispatch(Action::EvolutionsDidLoad {
        url: "chain-b".to_string(),
        nodes: vec![node(1, "bulbasaur")],
    });
    assert!(!stale.changed);
    assert!(store.state().evolutions.is_empty());
}

#[test]
fn failed_detail_fetch_sets_message() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::DetailOpen);

    store.dispatch(Action::DetailDidLoad {
        query: "pikachu".to_string(),
        detail: None,
    });
    assert!(!store.state().detail_loading);
    assert!(store.state().detail.is_none());
    assert_eq!(
        store.state().message.as_deref(),
        Some("No data available for pikachu.")
    );
}

#[test]
fn evolution_open_fetches_the_selected_stage() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::DetailOpen);
    store.dispatch(Action::DetailDidLoad {
        query: "pikachu".to_string(),
        detail: Some(detail(25, "pikachu", Some("chain"))),
    });
    store.dispatch(Action::EvolutionsDidLoad {
        url: "chain".to_string(),
        nodes: vec![node(172, "pichu"), node(25, "pikachu"), node(26, "raichu")],
    });

    // Opening the stage already on screen is a no-op.
    let same = store.dispatch(Action::EvolutionOpen);
    assert!(!same.changed);

    store.dispatch(Action::EvolutionSelect(2));
    let result = store.dispatch(Action::EvolutionOpen);
    assert_eq!(store.state().detail_query.as_deref(), Some("raichu"));
    assert!(store.state().detail.is_none());
    assert!(store.state().detail_loading);
    assert!(matches!(
        &result.effects[0],
        Effect::LoadDetail { query, .. } if query == "raichu"
    ));
}

#[test]
fn favorite_toggle_from_catalog_persists_both_ways() {
    let mut store = EffectStore::new(catalog_state(), reducer);

    let result = store.dispatch(Action::ToggleFavorite);
    assert_eq!(store.state().favorites.len(), 1);
    assert!(matches!(
        &result.effects[0],
        Effect::PersistFavorites { entries } if entries.len() == 1
    ));
    assert!(store
        .state()
        .favorites
        .is_favorite(&FavoriteId::Number(25)));

    let result = store.dispatch(Action::ToggleFavorite);
    assert!(store.state().favorites.is_empty());
    assert!(matches!(
        &result.effects[0],
        Effect::PersistFavorites { entries } if entries.is_empty()
    ));
}

#[test]
fn favorite_remove_clamps_selection_and_persists() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::ToggleFavorite);
    store.dispatch(Action::SelectionMove(1));
    store.dispatch(Action::ToggleFavorite);

    store.dispatch(Action::FavoritesOpen);
    assert_eq!(store.state().screen, Screen::Favorites);
    store.dispatch(Action::FavoriteSelect(1));

    let result = store.dispatch(Action::FavoriteRemove);
    assert_eq!(store.state().favorites.len(), 1);
    assert_eq!(store.state().favorites_index, 0);
    assert!(matches!(result.effects[0], Effect::PersistFavorites { .. }));

    // Nothing selected beyond the end once the list is empty again.
    store.dispatch(Action::FavoriteRemove);
    let result = store.dispatch(Action::FavoriteRemove);
    assert!(!result.changed);
}

#[test]
fn favorites_load_dedups_persisted_duplicates() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let entries = vec![
        FavoriteEntry {
            id: FavoriteId::Number(6),
            name: "charizard".to_string(),
            sprite_url: None,
            types: Vec::new(),
        },
        FavoriteEntry {
            id: FavoriteId::from("6"),
            name: "charizard-dup".to_string(),
            sprite_url: None,
            types: Vec::new(),
        },
    ];
    store.dispatch(Action::FavoritesDidLoad(entries));
    assert!(store.state().favorites_loaded);
    assert_eq!(store.state().favorites.len(), 1);
}

#[test]
fn back_walks_detail_to_origin_and_catalog_to_home() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::DetailOpen);
    store.dispatch(Action::Back);
    assert_eq!(store.state().screen, Screen::Catalog);
    assert!(store.state().detail_query.is_none());

    store.dispatch(Action::Back);
    assert_eq!(store.state().screen, Screen::Home);
    assert!(store.state().region.is_none());
    assert!(store.state().catalog.is_empty());

    let result = store.dispatch(Action::Back);
    assert!(!result.changed);
}

#[test]
fn back_from_favorites_returns_to_catalog_when_region_open() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::FavoritesOpen);
    store.dispatch(Action::Back);
    assert_eq!(store.state().screen, Screen::Catalog);
}

#[test]
fn detail_opened_from_favorites_returns_there() {
    let mut store = EffectStore::new(catalog_state(), reducer);
    store.dispatch(Action::ToggleFavorite);
    store.dispatch(Action::FavoritesOpen);

    let result = store.dispatch(Action::FavoriteOpen);
    assert_eq!(store.state().screen, Screen::Detail);
    assert!(matches!(
        &result.effects[0],
        Effect::LoadDetail { query, .. } if query == "25"
    ));

    store.dispatch(Action::Back);
    assert_eq!(store.state().screen, Screen::Favorites);
}
