use std::cell::RefCell;
use std::io;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use regiodex::action::Action;
use regiodex::api;
use regiodex::effect::Effect;
use regiodex::favorites::{entries_from_document, FavoriteEntry};
use regiodex::reducer::reducer;
use regiodex::state::{AppState, Screen};
use regiodex::ui::{RegioComponentId, RegioContext, RegioUi};

#[derive(Parser, Debug)]
#[command(name = "regiodex")]
#[command(about = "Region-based creature catalog TUI")]
struct Args {
    /// Language tag used to pick creature descriptions
    #[arg(long, default_value = "es")]
    locale: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        locale,
        debug: debug_args,
    } = Args::parse();
    let debug = DebugSession::new(debug_args);

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState {
                locale,
                ..AppState::default()
            })
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(RegioUi::new()));
    let mut bus: EventBus<AppState, Action, RegioComponentId, RegioContext> = EventBus::new();
    let keybindings: Keybindings<RegioContext> = Keybindings::new();

    let ui_regions = Rc::clone(&ui);
    bus.register(RegioComponentId::Regions, move |event, state| {
        ui_regions
            .borrow_mut()
            .handle_regions_event(&event.kind, state)
    });

    let ui_catalog = Rc::clone(&ui);
    bus.register(RegioComponentId::Catalog, move |event, state| {
        ui_catalog
            .borrow_mut()
            .handle_catalog_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(RegioComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_favorites = Rc::clone(&ui);
    bus.register(RegioComponentId::Favorites, move |event, state| {
        ui_favorites
            .borrow_mut()
            .handle_favorites_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(RegioComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Char('q') if !state.search.active => {
                HandlerResponse::action(Action::Quit)
            }
            crossterm::event::KeyCode::Char('/')
                if state.screen == Screen::Catalog && !state.search.active =>
            {
                HandlerResponse::action(Action::SearchStart)
            }
            crossterm::event::KeyCode::Esc if !state.search.active => {
                HandlerResponse::action(Action::Back)
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadRegions => {
            ctx.tasks().spawn(TaskKey::new("regions"), async {
                Action::RegionsDidLoad(api::fetch_regions().await)
            });
        }
        Effect::LoadCatalog { region } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                let entries = api::fetch_catalog(&region).await;
                Action::CatalogDidLoad { region, entries }
            });
        }
        Effect::LoadTypes => {
            ctx.tasks().spawn(TaskKey::new("types"), async {
                Action::TypesDidLoad(api::fetch_types().await)
            });
        }
        Effect::LoadTypeMembers { name } => {
            let key = format!("type_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let mut members: Vec<String> =
                    api::fetch_type_members(&name).await.into_iter().collect();
                members.sort();
                Action::TypeMembersDidLoad { name, members }
            });
        }
        Effect::LoadDetail { query, locale } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                let detail = api::fetch_detail(&query, &locale).await;
                Action::DetailDidLoad { query, detail }
            });
        }
        Effect::LoadEvolutions { url } => {
            ctx.tasks().spawn(TaskKey::new("evolutions"), async move {
                let nodes = api::fetch_evolutions(&url).await;
                Action::EvolutionsDidLoad { url, nodes }
            });
        }
        Effect::LoadFavorites => {
            ctx.tasks().spawn(TaskKey::new("favorites_load"), async {
                Action::FavoritesDidLoad(load_favorites().await)
            });
        }
        Effect::PersistFavorites { entries } => {
            ctx.tasks().spawn(TaskKey::new("favorites_save"), async move {
                match save_favorites(&entries).await {
                    Ok(()) => Action::FavoritesDidPersist,
                    Err(error) => Action::FavoritesPersistDidError(error),
                }
            });
        }
    }
}

fn favorites_file_path() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("regiodex").join("favorites.json")
}

async fn save_favorites(entries: &[FavoriteEntry]) -> Result<(), String> {
    let path = favorites_file_path();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create data directory: {}", e))?;
    }
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| format!("Failed to serialize favorites: {}", e))?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| format!("Failed to write favorites file: {}", e))?;
    Ok(())
}

/// Missing or unreadable favorites files start the session empty; older
/// builds persisted raw upstream records, so the document is normalized
/// entry by entry instead of being parsed as one typed list.
async fn load_favorites() -> Vec<FavoriteEntry> {
    let path = favorites_file_path();
    let json = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&json) {
        Ok(values) => entries_from_document(values),
        Err(_) => Vec::new(),
    }
}
