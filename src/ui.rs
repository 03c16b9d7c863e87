use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crate::action::Action;
use crate::state::{AppState, Screen};

const BG_BASE: Color = Color::Rgb(16, 18, 30);
const BG_PANEL: Color = Color::Rgb(26, 30, 48);
const BG_PANEL_ALT: Color = Color::Rgb(32, 36, 56);
const BG_HIGHLIGHT: Color = Color::Rgb(70, 62, 112);
const TEXT_MAIN: Color = Color::Rgb(230, 232, 240);
const TEXT_DIM: Color = Color::Rgb(160, 166, 190);
const ACCENT_BLUE: Color = Color::Rgb(130, 170, 255);
const ACCENT_GOLD: Color = Color::Rgb(238, 192, 104);

/// Moves are already capped at fetch time; the detail screen caps again
/// for layout.
const MOVE_DISPLAY_LIMIT: usize = 10;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RegioComponentId {
    Regions,
    Catalog,
    Detail,
    Favorites,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegioContext {
    Regions,
    Catalog,
    Detail,
    Favorites,
    Search,
}

impl EventRoutingState<RegioComponentId, RegioContext> for AppState {
    fn focused(&self) -> Option<RegioComponentId> {
        if self.search.active {
            return Some(RegioComponentId::Search);
        }
        Some(match self.screen {
            Screen::Home => RegioComponentId::Regions,
            Screen::Catalog => RegioComponentId::Catalog,
            Screen::Detail => RegioComponentId::Detail,
            Screen::Favorites => RegioComponentId::Favorites,
        })
    }

    fn modal(&self) -> Option<RegioComponentId> {
        if self.search.active {
            Some(RegioComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: RegioComponentId) -> RegioContext {
        match id {
            RegioComponentId::Regions => RegioContext::Regions,
            RegioComponentId::Catalog => RegioContext::Catalog,
            RegioComponentId::Detail => RegioContext::Detail,
            RegioComponentId::Favorites => RegioContext::Favorites,
            RegioComponentId::Search => RegioContext::Search,
        }
    }

    fn default_context(&self) -> RegioContext {
        RegioContext::Regions
    }
}

pub struct RegioUi {
    region_list: SelectList,
    catalog_list: SelectList,
    evolution_list: SelectList,
    favorites_list: SelectList,
    status_bar: StatusBar,
}

impl Default for RegioUi {
    fn default() -> Self {
        Self::new()
    }
}

impl RegioUi {
    pub fn new() -> Self {
        Self {
            region_list: SelectList::new(),
            catalog_list: SelectList::new(),
            evolution_list: SelectList::new(),
            favorites_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<RegioComponentId>,
    ) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        render_header(frame, layout[0], state);
        if state.search.active {
            event_ctx.set_component_area(RegioComponentId::Search, layout[0]);
        }
        let body_component = match state.screen {
            Screen::Home => RegioComponentId::Regions,
            Screen::Catalog => RegioComponentId::Catalog,
            Screen::Detail => RegioComponentId::Detail,
            Screen::Favorites => RegioComponentId::Favorites,
        };
        event_ctx.set_component_area(body_component, layout[1]);

        match state.screen {
            Screen::Home => render_home(frame, layout[1], state, &mut self.region_list),
            Screen::Catalog => render_catalog(frame, layout[1], state, &mut self.catalog_list),
            Screen::Detail => render_detail(frame, layout[1], state, &mut self.evolution_list),
            Screen::Favorites => {
                render_favorites(frame, layout[1], state, &mut self.favorites_list)
            }
        }
        render_footer(frame, layout[2], state, &mut self.status_bar);
    }

    pub fn handle_regions_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_regions_event(event, state, &mut self.region_list)
    }

    pub fn handle_catalog_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_catalog_event(event, state, &mut self.catalog_list)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_detail_event(event, state, &mut self.evolution_list)
    }

    pub fn handle_favorites_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_favorites_event(event, state, &mut self.favorites_list)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }
}

fn handle_regions_event(
    event: &EventKind,
    state: &AppState,
    region_list: &mut SelectList,
) -> HandlerResponse<Action> {
    match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => handler_response(vec![Action::RegionOpen]),
            crossterm::event::KeyCode::Char('v') => {
                handler_response(vec![Action::FavoritesOpen])
            }
            _ => {
                let items = region_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.region_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: false,
                        wrap_navigation: false,
                    },
                    on_select: Action::RegionSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = region_list.handle_event(event, props).into_iter().collect();
                handler_response(actions)
            }
        },
        _ => HandlerResponse::ignored(),
    }
}

fn handle_catalog_event(
    event: &EventKind,
    state: &AppState,
    catalog_list: &mut SelectList,
) -> HandlerResponse<Action> {
    match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => handler_response(vec![Action::DetailOpen]),
            crossterm::event::KeyCode::PageDown => {
                handler_response(vec![Action::SelectionPage(1)])
            }
            crossterm::event::KeyCode::PageUp => {
                handler_response(vec![Action::SelectionPage(-1)])
            }
            crossterm::event::KeyCode::Char('[') => {
                handler_response(vec![Action::TypeCursorMove(-1)])
            }
            crossterm::event::KeyCode::Char(']') => {
                handler_response(vec![Action::TypeCursorMove(1)])
            }
            crossterm::event::KeyCode::Char('t') => handler_response(vec![Action::TypeToggle]),
            crossterm::event::KeyCode::Char('c') => {
                handler_response(vec![Action::TypeFilterClear])
            }
            crossterm::event::KeyCode::Char('f') => {
                handler_response(vec![Action::ToggleFavorite])
            }
            crossterm::event::KeyCode::Char('v') => {
                handler_response(vec![Action::FavoritesOpen])
            }
            _ => {
                let items = catalog_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::CatalogSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = catalog_list.handle_event(event, props).into_iter().collect();
                handler_response(actions)
            }
        },
        EventKind::Scroll { delta, .. } => {
            handler_response(vec![Action::SelectionMove((*delta * 3) as i16)])
        }
        _ => HandlerResponse::ignored(),
    }
}

fn handle_detail_event(
    event: &EventKind,
    state: &AppState,
    evolution_list: &mut SelectList,
) -> HandlerResponse<Action> {
    match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => handler_response(vec![Action::EvolutionOpen]),
            crossterm::event::KeyCode::Char('f') => {
                handler_response(vec![Action::ToggleFavorite])
            }
            crossterm::event::KeyCode::Char('v') => {
                handler_response(vec![Action::FavoritesOpen])
            }
            _ => {
                let items = evolution_items(state);
                if items.is_empty() {
                    return HandlerResponse::ignored();
                }
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.evolution_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: panel_list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: false,
                        wrap_navigation: false,
                    },
                    on_select: Action::EvolutionSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = evolution_list
                    .handle_event(event, props)
                    .into_iter()
                    .collect();
                handler_response(actions)
            }
        },
        _ => HandlerResponse::ignored(),
    }
}

fn handle_favorites_event(
    event: &EventKind,
    state: &AppState,
    favorites_list: &mut SelectList,
) -> HandlerResponse<Action> {
    match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => handler_response(vec![Action::FavoriteOpen]),
            crossterm::event::KeyCode::Char('d') | crossterm::event::KeyCode::Delete => {
                handler_response(vec![Action::FavoriteRemove])
            }
            _ => {
                let items = favorite_items(state);
                if items.is_empty() {
                    return HandlerResponse::ignored();
                }
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.favorites_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::FavoriteSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = favorites_list
                    .handle_event(event, props)
                    .into_iter()
                    .collect();
                handler_response(actions)
            }
        },
        EventKind::Scroll { delta, .. } => {
            handler_response(vec![Action::SelectionMove((*delta * 3) as i16)])
        }
        _ => HandlerResponse::ignored(),
    }
}

fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let title_style = Style::default()
        .fg(ACCENT_BLUE)
        .add_modifier(Modifier::BOLD);
    let region = state
        .current_region()
        .map(|name| name.to_ascii_uppercase())
        .unwrap_or_else(|| "-".to_string());
    let filter = state
        .type_filter
        .as_deref()
        .map(|name| name.to_ascii_uppercase())
        .unwrap_or_else(|| "ALL".to_string());
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let line = Line::from(vec![
        Span::styled("REGIODEX", title_style),
        Span::raw("  Region: "),
        Span::styled(region, Style::default().fg(ACCENT_GOLD)),
        Span::raw("  Type: "),
        Span::styled(filter, Style::default().fg(ACCENT_GOLD)),
        Span::raw("  Search: "),
        Span::styled(search, Style::default().fg(ACCENT_BLUE)),
        Span::raw("  Favorites: "),
        Span::styled(
            state.favorites.len().to_string(),
            Style::default().fg(ACCENT_GOLD),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_home(frame: &mut Frame, area: Rect, state: &AppState, region_list: &mut SelectList) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("REGIONS")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_BLUE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.regions.is_empty() {
        let message = if state.region_loading {
            "Loading regions..."
        } else {
            "No regions available."
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(TEXT_DIM)),
            inner,
        );
        return;
    }

    let items = region_items(state);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.region_index.min(items.len().saturating_sub(1)),
        is_focused: state.screen == Screen::Home,
        style: list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: false,
            wrap_navigation: false,
        },
        on_select: Action::RegionSelect,
        render_item: &|item| item.clone(),
    };
    region_list.render(frame, inner, props);
}

pub fn render_catalog(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    catalog_list: &mut SelectList,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    render_type_row(frame, layout[0], state);

    let title = state
        .current_region()
        .map(|name| name.to_ascii_uppercase())
        .unwrap_or_else(|| "CATALOG".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_BLUE));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    if state.filtered_indices.is_empty() {
        let message = if state.list_loading {
            "Loading catalog..."
        } else if state.type_filter.is_some() && state.type_members.is_none() {
            "Loading type members..."
        } else {
            "No creatures match."
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(TEXT_DIM)),
            inner,
        );
        return;
    }

    let items = catalog_items(state);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.selected_index.min(items.len().saturating_sub(1)),
        is_focused: state.screen == Screen::Catalog && !state.search.active,
        style: list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::CatalogSelect,
        render_item: &|item| item.clone(),
    };
    catalog_list.render(frame, inner, props);
}

fn render_type_row(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut titles = vec![Line::from("ALL")];
    titles.extend(
        state
            .type_list
            .iter()
            .map(|name| {
                if state.type_filter.as_deref() == Some(name.as_str()) {
                    Line::from(Span::styled(
                        name.to_ascii_uppercase(),
                        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(name.to_ascii_uppercase())
                }
            }),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title("TYPE")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_DIM))
        .border_style(Style::default().fg(TEXT_DIM));
    let tabs = Tabs::new(titles)
        .block(block)
        .select(state.type_cursor)
        .highlight_style(
            Style::default()
                .bg(BG_HIGHLIGHT)
                .fg(TEXT_MAIN)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    evolution_list: &mut SelectList,
) {
    let title = state
        .detail
        .as_ref()
        .map(|detail| format!("#{:03} {}", detail.id, format_name(&detail.name)))
        .or_else(|| state.detail_query.clone())
        .unwrap_or_else(|| "DETAIL".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_BLUE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(detail) = state.detail.as_ref() else {
        let message = if state.detail_loading {
            "Loading creature..."
        } else {
            state.message.as_deref().unwrap_or("No data available.")
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(TEXT_DIM))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(6),
        ])
        .split(inner);

    let favorite = if state.is_detail_favorite() { "*" } else { " " };
    let profile = Text::from(vec![
        Line::from(vec![
            Span::styled(favorite, Style::default().fg(ACCENT_GOLD)),
            Span::raw(" Types: "),
            Span::styled(detail.types.join(" / "), Style::default().fg(ACCENT_BLUE)),
        ]),
        Line::from(format!(
            "  Height: {:.1} m   Weight: {:.1} kg",
            detail.height_meters(),
            detail.weight_kilograms()
        )),
    ]);
    frame.render_widget(Paragraph::new(profile), layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(layout[1]);

    let description = Paragraph::new(detail.description.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("DESCRIPTION")
                .border_style(Style::default().fg(TEXT_DIM)),
        )
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);
    frame.render_widget(description, body[0]);

    let moves: Vec<Line> = detail
        .moves
        .iter()
        .take(MOVE_DISPLAY_LIMIT)
        .enumerate()
        .map(|(idx, name)| Line::from(format!("{:02} {}", idx + 1, format_name(name))))
        .collect();
    let moves = Paragraph::new(Text::from(moves)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("MOVES")
            .border_style(Style::default().fg(TEXT_DIM)),
    );
    frame.render_widget(moves, body[1]);

    render_evolution_panel(frame, layout[2], state, evolution_list);
}

fn render_evolution_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    evolution_list: &mut SelectList,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("EVOLUTION")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = evolution_items(state);
    if items.is_empty() {
        let message = if state.evolution_loading {
            "Loading evolutions..."
        } else {
            "No evolution data."
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(TEXT_DIM)),
            inner,
        );
        return;
    }

    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.evolution_index.min(items.len().saturating_sub(1)),
        is_focused: state.screen == Screen::Detail,
        style: panel_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: false,
            wrap_navigation: false,
        },
        on_select: Action::EvolutionSelect,
        render_item: &|item| item.clone(),
    };
    evolution_list.render(frame, inner, props);
}

pub fn render_favorites(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    favorites_list: &mut SelectList,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("FAVORITES")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_BLUE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.favorites.is_empty() {
        let message = if state.favorites_loaded {
            "No favorites yet. Press f on a creature to add one."
        } else {
            "Loading favorites..."
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(TEXT_DIM)),
            inner,
        );
        return;
    }

    let items = favorite_items(state);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.favorites_index.min(items.len().saturating_sub(1)),
        is_focused: state.screen == Screen::Favorites,
        style: list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::FavoriteSelect,
        render_item: &|item| item.clone(),
    };
    favorites_list.render(frame, inner, props);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.list_loading {
            "Loading catalog...".to_string()
        } else if state.detail_loading {
            "Loading creature...".to_string()
        } else if state.evolution_loading {
            "Loading evolutions...".to_string()
        } else if state.type_loading {
            "Loading type members...".to_string()
        } else if state.region_loading {
            "Loading regions...".to_string()
        } else {
            String::new()
        }
    });
    let (left_hints, center_hints) = status_hints(state);
    let status_span = Span::styled(status, Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: None,
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_BLUE)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active {
        let left = vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
        return (left, vec![StatusBarHint::new("q", "Quit")]);
    }

    let left = match state.screen {
        Screen::Home => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Open"),
        ],
        Screen::Catalog => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Detail"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("[ ]", "Type"),
            StatusBarHint::new("t", "Toggle type"),
            StatusBarHint::new("f", "Favorite"),
        ],
        Screen::Detail => vec![
            StatusBarHint::new("j/k", "Evolution"),
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("f", "Favorite"),
        ],
        Screen::Favorites => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Detail"),
            StatusBarHint::new("d", "Remove"),
        ],
    };
    let center = vec![
        StatusBarHint::new("v", "Favorites"),
        StatusBarHint::new("Esc", "Back"),
        StatusBarHint::new("q", "Quit"),
    ];
    (left, center)
}

fn region_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .regions
        .iter()
        .enumerate()
        .map(|(idx, name)| Line::from(format!("{:02} {}", idx + 1, name.to_ascii_uppercase())))
        .collect()
}

fn catalog_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .filtered_indices
        .iter()
        .filter_map(|idx| state.catalog.get(*idx))
        .map(|entry| {
            let fav = if state.favorites.is_favorite(&entry.id.into()) {
                "*"
            } else {
                " "
            };
            Line::from(format!("{} #{:03} {}", fav, entry.id, format_name(&entry.name)))
        })
        .collect()
}

fn evolution_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .evolutions
        .iter()
        .map(|node| {
            let marker = if state
                .detail
                .as_ref()
                .is_some_and(|detail| detail.id == node.id)
            {
                ">"
            } else {
                " "
            };
            Line::from(format!("{} #{:03} {}", marker, node.id, format_name(&node.name)))
        })
        .collect()
}

fn favorite_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .favorites
        .entries()
        .iter()
        .map(|entry| {
            let types = if entry.types.is_empty() {
                String::new()
            } else {
                format!("  [{}]", entry.types.join("/"))
            };
            Line::from(format!("* {} {}{}", entry.id, format_name(&entry.name), types))
        })
        .collect()
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn panel_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL_ALT),
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn format_name(name: &str) -> String {
    name.replace('-', " ")
}
