//! Catalogue search screen.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::tui::state::SearchScreen;

pub fn render(frame: &mut Frame, area: Rect, search: &SearchScreen) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let title = Paragraph::new(Span::styled(
        "CATALOGUE ANSWERS",
        Style::default().fg(Color::Cyan).bold(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    render_input(frame, chunks[1], &search.input);
    render_results(frame, chunks[2], search);
    super::render_status(frame, chunks[3], search.status.as_ref());
    super::render_controls(
        frame,
        chunks[4],
        "enter search/open  ·  ↑/↓ select  ·  F2 admin  ·  esc quit",
    );
}

fn render_input(frame: &mut Frame, area: Rect, input: &str) {
    let line = Line::from(vec![
        Span::styled(input, Style::default().fg(Color::Yellow)),
        Span::styled("_", Style::default().fg(Color::Yellow)),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Test name ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_results(frame: &mut Frame, area: Rect, search: &SearchScreen) {
    let lines: Vec<Line> = search
        .results
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let is_selected = index == search.selected;
            let style = if is_selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if is_selected { ">" } else { " " };

            Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(item.display_name().to_string(), style),
                Span::styled(
                    format!("  #{}", item.id_text()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {}", item.kind.as_deref().unwrap_or("")),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    // Keep the selection visible.
    let visible = area.height.saturating_sub(2) as usize;
    let offset = search.selected.saturating_sub(visible.saturating_sub(1));

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Results ({}) ", search.results.len()))
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .scroll((offset as u16, 0));
    frame.render_widget(widget, area);
}
