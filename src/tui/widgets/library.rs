//! Library screen - saved palettes with search, tag and favorites filters

use crate::color;
use crate::library::LibraryEntry;
use crate::tui::theme::{get_theme, Theme};
use crate::tui::Snapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, snap: &Snapshot<'_>, area: Rect) {
    let theme = get_theme();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filters or prompt
            Constraint::Length(1),
            Constraint::Min(3), // Entries
        ])
        .split(area);

    render_filter_line(frame, snap, &theme, layout[0]);

    let view = &snap.app.library_view;
    let entries = snap.library.list(&view.filter);

    if entries.is_empty() {
        let msg = if view.filter.is_active() {
            "No palettes match the current filters. Press C to clear them."
        } else {
            "No saved palettes yet. Pin colors in the generator and press a to save."
        };
        frame.render_widget(
            Paragraph::new(Line::from(msg)).style(Style::default().fg(theme.palette.fg_secondary)),
            layout[2],
        );
        return;
    }

    let visible_height = layout[2].height as usize;
    let scroll_offset = view.scroll_offset;

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, entry)| entry_item(entry, i == view.selected, &theme))
        .collect();

    let adjusted_selected = view.selected.saturating_sub(scroll_offset);
    let mut list_state = ListState::default();
    list_state.select(Some(adjusted_selected));

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("\u{f054} ");
    frame.render_stateful_widget(list, layout[2], &mut list_state);

    // Scroll position indicator
    if entries.len() > visible_height {
        let pos_text = format!("{}/{}", view.selected + 1, entries.len());
        let pos_len = pos_text.len() as u16;
        let pos_x = layout[2].x + layout[2].width.saturating_sub(pos_len);
        if pos_x > layout[2].x {
            frame.render_widget(
                Paragraph::new(pos_text).style(Style::default().fg(theme.palette.fg_secondary)),
                Rect::new(pos_x, layout[2].y, pos_len, 1),
            );
        }
    }
}

fn render_filter_line(frame: &mut Frame, snap: &Snapshot<'_>, theme: &Theme, area: Rect) {
    let dim = Style::default().fg(theme.palette.fg_secondary);
    let active = Style::default()
        .fg(theme.palette.accent)
        .add_modifier(Modifier::BOLD);

    if let Some(input) = &snap.app.input {
        let line = Line::from(vec![
            Span::styled(format!("{}: ", input.target.label()), active),
            Span::styled(input.buffer.clone(), Style::default().fg(theme.palette.fg_primary)),
            Span::styled("█", Style::default().fg(theme.palette.accent)),
            Span::styled("  enter apply · esc cancel", dim),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let icons = &theme.icons;
    let filter = &snap.app.library_view.filter;
    let field = |value: &Option<String>| match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Span::styled(v.to_string(), active),
        _ => Span::styled("any", dim),
    };

    let line = Line::from(vec![
        Span::styled(format!("{} ", icons.search), dim),
        field(&filter.query),
        Span::styled(format!("   {} ", icons.tag), dim),
        field(&filter.tag),
        Span::styled(format!("   {} ", icons.star), dim),
        if filter.favorites_only {
            Span::styled("favorites", active)
        } else {
            Span::styled("all", dim)
        },
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn entry_item(entry: &LibraryEntry, is_selected: bool, theme: &Theme) -> ListItem<'static> {
    let name_style = if is_selected {
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.palette.fg_primary)
    };
    let dim = Style::default().fg(theme.palette.fg_secondary);

    let star = if entry.favorite { theme.icons.star } else { " " };
    let mut spans = vec![
        Span::styled(format!("{star} "), Style::default().fg(theme.palette.accent)),
        Span::styled(entry.name.clone(), name_style),
        Span::raw("  "),
    ];
    for hex in &entry.colors {
        let bg = color::normalize(hex)
            .map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b))
            .unwrap_or(theme.palette.bg_primary);
        spans.push(Span::styled("  ", Style::default().bg(bg)));
    }
    if !entry.tags.is_empty() {
        spans.push(Span::styled(format!("  {} {}", theme.icons.tag, entry.tags.join(", ")), dim));
    }
    spans.push(Span::styled(format!("  {}", short_id(&entry.id)), dim));

    ListItem::new(Line::from(spans))
}

/// Leading characters of an id; enough to address an entry from the CLI.
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
