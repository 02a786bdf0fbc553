//! Help screen showing keybindings

use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left_content = vec![
        section_header("Generator", &theme),
        keybind("Space / r", "Regenerate unpinned colors", &theme),
        keybind("h / l", "Select color", &theme),
        keybind("p / Enter", "Pin or unpin color", &theme),
        keybind("s", "Cycle size 3 / 5 / 7", &theme),
        keybind("f", "Toggle HEX / RGB", &theme),
        keybind("d", "Toggle dark preview", &theme),
        keybind("c / y", "Copy selected color", &theme),
        keybind("a", "Save pinned colors", &theme),
        Line::default(),
        section_header("Export", &theme),
        keybind("h / l", "Change format", &theme),
        keybind("c / Enter", "Copy snippet", &theme),
    ];
    frame.render_widget(Paragraph::new(left_content).wrap(Wrap { trim: false }), cols[0]);

    let right_content = vec![
        section_header("Library", &theme),
        keybind("j / k", "Move selection", &theme),
        keybind("Enter", "Open in generator", &theme),
        keybind("/", "Search by name", &theme),
        keybind("t", "Filter by tag", &theme),
        keybind("F", "Favorites only", &theme),
        keybind("C", "Clear filters", &theme),
        keybind("f", "Toggle favorite", &theme),
        keybind("e", "Rename", &theme),
        keybind("T", "Edit tags", &theme),
        keybind("x / Del", "Delete", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("Tab", "Next view", &theme),
        keybind("1-4", "Go to view", &theme),
        keybind("q / Esc", "Quit", &theme),
    ];
    frame.render_widget(Paragraph::new(right_content).wrap(Wrap { trim: false }), cols[1]);
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:12}", key),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
