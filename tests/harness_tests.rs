//! Integrated store tests using EffectStoreTestHarness: async completion
//! flows, effect assertions, and plain-text render checks.

use tui_dispatch::testing::*;
use tui_dispatch::EffectStore;
use tui_dispatch_components::SelectList;
use regiodex::{
    action::Action,
    api,
    effect::Effect,
    reducer::reducer,
    state::{AppState, CreatureDetail, CreatureSummary, Screen},
    ui,
};

fn summary(id: u32, name: &str) -> CreatureSummary {
    CreatureSummary {
        id,
        name: name.to_string(),
        sprite_url: api::sprite_url(id),
    }
}

fn catalog_state() -> AppState {
    let mut state = AppState {
        screen: Screen::Catalog,
        region: Some("kanto".to_string()),
        favorites_loaded: true,
        ..AppState::default()
    };
    state.catalog = vec![
        summary(25, "pikachu"),
        summary(26, "raichu"),
        summary(1, "bulbasaur"),
    ];
    state.type_list = vec!["electric".to_string()];
    state.rebuild_filtered();
    state
}

fn mock_detail() -> CreatureDetail {
    CreatureDetail {
        id: 25,
        name: "pikachu".to_string(),
        sprite_url: api::sprite_url(25),
        types: vec!["electric".to_string()],
        height: 4,
        weight: 60,
        description: "Cuando varios de estos se juntan, su electricidad".to_string(),
        moves: vec!["mega-punch".to_string(), "thunder-shock".to_string()],
        evolution_chain_url: None,
    }
}

#[test]
fn region_open_flow_loads_catalog() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::RegionsDidLoad(api::region_names()));
    harness.dispatch_collect(Action::RegionOpen);
    harness.assert_state(|s| s.screen == Screen::Catalog && s.list_loading);

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::LoadCatalog { region } if region == "kanto"));

    // Simulate the fetch resolving.
    harness.complete_action(Action::CatalogDidLoad {
        region: "kanto".to_string(),
        entries: vec![summary(25, "pikachu")],
    });
    harness.process_emitted();

    harness.assert_state(|s| !s.list_loading);
    harness.assert_state(|s| s.catalog.len() == 1);
}

#[test]
fn changing_type_mid_flight_drops_the_late_member_set() {
    let mut harness = EffectStoreTestHarness::new(catalog_state(), reducer);

    harness.dispatch_collect(Action::TypeCursorMove(1));
    harness.dispatch_collect(Action::TypeToggle);
    harness.assert_state(|s| s.filtered_indices.is_empty());

    // The user clears the filter before the members arrive.
    harness.dispatch_collect(Action::TypeToggle);

    harness.complete_action(Action::TypeMembersDidLoad {
        name: "electric".to_string(),
        members: vec!["pikachu".to_string()],
    });
    harness.process_emitted();

    harness.assert_state(|s| s.type_filter.is_none());
    harness.assert_state(|s| s.type_members.is_none());
    harness.assert_state(|s| s.filtered_indices.len() == 3);
}

#[test]
fn favorite_toggle_round_trip_through_persistence() {
    let mut store = EffectStore::new(catalog_state(), reducer);

    store.dispatch(Action::ToggleFavorite);

    // Feed the persisted snapshot back in as a fresh startup load.
    let json = serde_json::to_string(store.state().favorites.entries()).expect("serialize");
    let reloaded = serde_json::from_str(&json).expect("deserialize");

    let mut restarted = EffectStoreTestHarness::new(AppState::default(), reducer);
    restarted.complete_action(Action::FavoritesDidLoad(reloaded));
    restarted.process_emitted();

    restarted.assert_state(|s| s.favorites.len() == 1);
    restarted.assert_state(|s| s.favorites.entries()[0].name == "pikachu");
}

#[test]
fn persist_error_surfaces_as_status_message() {
    let mut harness = EffectStoreTestHarness::new(catalog_state(), reducer);

    harness.dispatch_collect(Action::ToggleFavorite);
    harness.complete_action(Action::FavoritesPersistDidError("disk full".to_string()));
    harness.process_emitted();

    // In-memory state stays authoritative.
    harness.assert_state(|s| s.favorites.len() == 1);
    harness.assert_state(|s| {
        s.message.as_deref() == Some("Favorites save error: disk full")
    });
}

#[test]
fn render_catalog_lists_filtered_names() {
    let mut harness = EffectStoreTestHarness::new(catalog_state(), reducer);
    let mut catalog_list = SelectList::new();

    let output = harness.render_plain(70, 20, |frame, area, state| {
        ui::render_catalog(frame, area, state, &mut catalog_list);
    });
    assert!(output.contains("pikachu"), "catalog output:\n{output}");
    assert!(output.contains("bulbasaur"), "catalog output:\n{output}");
}

#[test]
fn render_catalog_shows_pending_type_filter() {
    let mut harness = EffectStoreTestHarness::new(catalog_state(), reducer);
    let mut catalog_list = SelectList::new();

    harness.dispatch_collect(Action::TypeCursorMove(1));
    harness.dispatch_collect(Action::TypeToggle);

    let output = harness.render_plain(70, 20, |frame, area, state| {
        ui::render_catalog(frame, area, state, &mut catalog_list);
    });
    assert!(
        output.contains("Loading type members"),
        "catalog output:\n{output}"
    );
}

#[test]
fn render_detail_shows_display_units_and_description() {
    let mut state = catalog_state();
    state.screen = Screen::Detail;
    state.detail_query = Some("pikachu".to_string());
    state.detail = Some(mock_detail());
    let mut harness = EffectStoreTestHarness::new(state, reducer);
    let mut evolution_list = SelectList::new();

    let output = harness.render_plain(80, 24, |frame, area, state| {
        ui::render_detail(frame, area, state, &mut evolution_list);
    });
    assert!(output.contains("0.4 m"), "detail output:\n{output}");
    assert!(output.contains("6.0 kg"), "detail output:\n{output}");
    assert!(output.contains("Cuando varios"), "detail output:\n{output}");
}

#[test]
fn render_favorites_empty_state() {
    let mut harness = EffectStoreTestHarness::new(catalog_state(), reducer);
    let mut favorites_list = SelectList::new();

    let output = harness.render_plain(70, 12, |frame, area, state| {
        ui::render_favorites(frame, area, state, &mut favorites_list);
    });
    assert!(output.contains("No favorites yet"), "favorites output:\n{output}");
}
