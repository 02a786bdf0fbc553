//! Root layout widget - orchestrates main layout structure

use crate::app::state::{Screen, ToastKind};
use crate::tui::theme::get_theme;
use crate::tui::Snapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{export, generator, help, library, sidebar};

/// Main layout structure:
/// ┌──────────┬─────────────────────────────────────────┐
/// │  Menu    │           Main Content                  │
/// │          │   (Generator/Library/Export/Help)       │
/// │ Generator│                                         │
/// │ Library  │                                         │
/// │ Export   │                                         │
/// │          │                                         │
/// │ Help     │                                         │
/// ├──────────┴─────────────────────────────────────────┤
/// │ toast or key hints                                 │
/// └────────────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, snap: &Snapshot<'_>) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Sidebar + content
            Constraint::Length(3), // Status bar
        ])
        .split(root);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(40)])
        .split(rows[0]);

    sidebar::render(frame, snap.app, top_cols[0]);
    render_main_content(frame, snap, top_cols[1]);
    render_status_bar(frame, snap, rows[1]);
}

fn render_main_content(frame: &mut Frame, snap: &Snapshot<'_>, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let title = match snap.app.screen {
        Screen::Generator => format!(" {} Generator ", icons.generator),
        Screen::Library => format!(" {} Library ({}) ", icons.library, snap.library.len()),
        Screen::Export => format!(" {} Export ", icons.export),
        Screen::Help => format!(" {} Keybinds ", icons.help),
    };

    let main = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = main.inner(area);
    frame.render_widget(main, area);

    // Horizontal padding
    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(inner)[1];

    match snap.app.screen {
        Screen::Generator => generator::render(frame, snap, padded),
        Screen::Library => library::render(frame, snap, padded),
        Screen::Export => export::render(frame, snap, padded),
        Screen::Help => help::render(frame, padded),
    }
}

fn render_status_bar(frame: &mut Frame, snap: &Snapshot<'_>, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match snap.app.toast.current() {
        Some(toast) => {
            let (icon, style) = match toast.kind {
                ToastKind::Success => (icons.success, Style::default().fg(theme.palette.accent)),
                ToastKind::Error => (
                    icons.error,
                    Style::default()
                        .fg(theme.palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            };
            Line::from(vec![
                Span::styled(format!(" {icon} "), style),
                Span::styled(toast.message.clone(), style),
            ])
        }
        None => Line::from(Span::styled(
            format!(" {}", hints(snap.app.screen)),
            Style::default().fg(theme.palette.fg_secondary),
        )),
    };

    frame.render_widget(Paragraph::new(line), inner);
}

fn hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Generator => "space regenerate · p pin · s size · f format · c copy · a save · ? help",
        Screen::Library => "enter apply · / search · t tag · F favorites · f star · e rename · x delete",
        Screen::Export => "h/l format · c copy · tab next view · q quit",
        Screen::Help => "tab next view · q quit",
    }
}
