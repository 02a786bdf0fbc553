use crate::app::state::{AppState, Screen};
use crate::tui::theme::get_theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Sidebar row; `None` screen marks a spacer.
struct MenuItem {
    icon: &'static str,
    screen: Option<Screen>,
}

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(" Menu ")
        .title_style(Style::default().fg(theme.palette.accent));

    let menu = [
        MenuItem { icon: icons.generator, screen: Some(Screen::Generator) },
        MenuItem { icon: icons.library, screen: Some(Screen::Library) },
        MenuItem { icon: icons.export, screen: Some(Screen::Export) },
        MenuItem { icon: "", screen: None },
        MenuItem { icon: icons.help, screen: Some(Screen::Help) },
    ];

    let items: Vec<ListItem> = menu
        .iter()
        .map(|item| {
            let Some(screen) = item.screen else {
                return ListItem::new(Line::from(""));
            };
            let is_selected = screen == state.screen;

            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };
            let icon_style = if is_selected {
                Style::default().fg(theme.palette.accent)
            } else {
                Style::default().fg(theme.palette.fg_secondary)
            };
            let prefix = if is_selected { icons.selected } else { icons.unselected };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, icon_style),
                Span::raw(" "),
                Span::styled(item.icon, icon_style),
                Span::raw(" "),
                Span::styled(title_case(screen.name()), style),
            ]))
        })
        .collect();

    let list_idx = menu
        .iter()
        .position(|item| item.screen == Some(state.screen))
        .unwrap_or(0);
    let mut list_state = ListState::default();
    list_state.select(Some(list_idx));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
