//! Generator screen - swatches, contrast table and accent suggestion

use crate::color::{self, AccessibilityLevel};
use crate::palette::analyze::{self, ColorAnalysis};
use crate::palette::PaletteSlot;
use crate::tui::theme::{get_theme, Theme};
use crate::tui::Snapshot;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

const LIGHT_PREVIEW_BG: Color = Color::Rgb(245, 245, 245);

pub fn render(frame: &mut Frame, snap: &Snapshot<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Summary
            Constraint::Length(5), // Swatches
            Constraint::Length(3), // Text preview
            Constraint::Length(1), // Accent
            Constraint::Min(3),    // Contrast table
        ])
        .split(area);

    let theme = get_theme();
    let session = snap.session;
    let analysis = analyze::analyze(&session.slots);

    render_summary(frame, snap, &theme, layout[0]);
    render_swatches(frame, &session.slots, &analysis, snap.app.selected_slot, &theme, layout[1]);
    render_preview(frame, &session.slots, session.dark_preview_enabled, &theme, layout[2]);
    render_accent(frame, &session.slots, &theme, layout[3]);
    render_table(frame, &analysis, &theme, layout[4]);
}

fn render_summary(frame: &mut Frame, snap: &Snapshot<'_>, theme: &Theme, area: Rect) {
    let session = snap.session;
    let dim = Style::default().fg(theme.palette.fg_secondary);
    let value = Style::default()
        .fg(theme.palette.fg_primary)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled("Size ", dim),
        Span::styled(session.size.to_string(), value),
        Span::styled("  Format ", dim),
        Span::styled(session.format.label(), value),
        Span::styled("  Pinned ", dim),
        Span::styled(format!("{}/{}", session.pinned_count(), session.slots.len()), value),
        Span::styled(format!("  {} ", theme.icons.dark), dim),
        Span::styled(if session.dark_preview_enabled { "dark" } else { "light" }, value),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_swatches(
    frame: &mut Frame,
    slots: &[PaletteSlot],
    analysis: &[ColorAnalysis],
    selected: usize,
    theme: &Theme,
    area: Rect,
) {
    if slots.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = slots
        .iter()
        .map(|_| Constraint::Ratio(1, slots.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, (slot, cell)) in slots.iter().zip(cells.iter()).enumerate() {
        let bg = swatch_color(&slot.value).unwrap_or(theme.palette.bg_primary);
        let fg = analysis
            .iter()
            .find(|a| color::to_hex(&slot.value).as_deref() == Some(a.hex.as_str()))
            .map(|a| if a.white_ratio >= a.black_ratio { Color::White } else { Color::Black })
            .unwrap_or(theme.palette.fg_primary);

        let border_style = if i == selected {
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.palette.border)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(theme.border_set())
            .border_style(border_style)
            .style(Style::default().bg(bg));

        let pin = if slot.is_pinned { theme.icons.pin } else { " " };
        let text = vec![
            Line::from(Span::styled(pin, Style::default().fg(fg))),
            Line::from(Span::styled(
                slot.value.clone(),
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(block),
            *cell,
        );
    }
}

fn render_preview(frame: &mut Frame, slots: &[PaletteSlot], dark: bool, theme: &Theme, area: Rect) {
    let bg = if dark { theme.palette.bg_preview_dark } else { LIGHT_PREVIEW_BG };

    let mut spans = Vec::with_capacity(slots.len());
    for slot in slots {
        let fg = swatch_color(&slot.value).unwrap_or(theme.palette.fg_secondary);
        spans.push(Span::styled(
            " Aa sample ",
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_accent(frame: &mut Frame, slots: &[PaletteSlot], theme: &Theme, area: Rect) {
    let dim = Style::default().fg(theme.palette.fg_secondary);
    let line = match analyze::suggest_accent(slots) {
        Some(accent) => {
            let swatch = swatch_color(&accent.value).unwrap_or(theme.palette.fg_primary);
            Line::from(vec![
                Span::styled("Accent ", dim),
                Span::styled("  ", Style::default().bg(swatch)),
                Span::styled(
                    format!(" #{} ", accent.value),
                    Style::default()
                        .fg(theme.palette.fg_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("slot {}, {:.2}:1 against slot {}", accent.index + 1, accent.ratio, slots.len() / 2 + 1),
                    dim,
                ),
            ])
        }
        None => Line::from(Span::styled("Accent  -", dim)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_table(frame: &mut Frame, analysis: &[ColorAnalysis], theme: &Theme, area: Rect) {
    let header = Row::new(["#", "Color", "vs white", "", "vs black", ""])
        .style(
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        );

    let rows: Vec<Row> = analysis
        .iter()
        .enumerate()
        .map(|(i, a)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(format!("#{}", a.hex)),
                Cell::from(format!("{:.2}:1", a.white_ratio)),
                level_cell(a.white_level, theme),
                Cell::from(format!("{:.2}:1", a.black_ratio)),
                level_cell(a.black_level, theme),
            ])
            .style(Style::default().fg(theme.palette.fg_primary))
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(5),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), area);
}

fn level_cell(level: AccessibilityLevel, theme: &Theme) -> Cell<'static> {
    let style = match level {
        AccessibilityLevel::Fail => Style::default().fg(theme.palette.fail),
        _ => Style::default()
            .fg(theme.palette.pass)
            .add_modifier(Modifier::BOLD),
    };
    Cell::from(Span::styled(level.label(), style))
}

fn swatch_color(value: &str) -> Option<Color> {
    color::normalize(value).map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b))
}
