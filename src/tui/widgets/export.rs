use crate::export::{self, ExportFormat};
use crate::tui::theme::get_theme;
use crate::tui::Snapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, snap: &Snapshot<'_>, area: Rect) {
    let theme = get_theme();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    let selected = snap.app.export_format;
    let tab_spans: Vec<Span> = ExportFormat::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, format)| {
            let is_selected = *format == selected;
            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_secondary)
            };

            let mut spans = vec![
                Span::styled("[", style),
                Span::styled(format.label(), style),
                Span::styled("]", style),
            ];
            if i < ExportFormat::ALL.len() - 1 {
                spans.push(Span::raw("  "));
            }
            spans
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tab_spans)), layout[0]);

    let snippet = export::render(selected, &snap.session.slots);
    let lines: Vec<Line> = snippet
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.palette.fg_primary))))
        .collect();
    frame.render_widget(Paragraph::new(lines), layout[1]);
}
