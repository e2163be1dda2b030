//! Admin password prompt and credential form.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::tui::state::{FormField, FormScreen, LoginScreen};

pub fn render_login(frame: &mut Frame, area: Rect, login: &LoginScreen) {
    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(9),
        Constraint::Percentage(35),
    ])
    .split(area);

    let masked = "*".repeat(login.password.chars().count());
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ADMIN",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::White)),
            Span::styled(masked, Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    if let Some(err) = &login.error {
        content.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
    } else {
        content.push(Line::from(""));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Enter] to log in  ·  [Esc] back",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

pub fn render_form(frame: &mut Frame, area: Rect, form: &FormScreen) {
    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(FormField::ALL.iter().map(|_| Constraint::Length(3)));
    constraints.extend([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ]);
    let chunks = Layout::vertical(constraints).margin(1).split(area);

    let title = Paragraph::new(Span::styled(
        "UPSTREAM CREDENTIALS",
        Style::default().fg(Color::Cyan).bold(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    for (index, field) in FormField::ALL.into_iter().enumerate() {
        render_field(frame, chunks[index + 1], form, field);
    }

    let status_index = FormField::ALL.len() + 2;
    super::render_status(frame, chunks[status_index], form.status.as_ref());
    super::render_controls(
        frame,
        chunks[status_index + 1],
        "tab next field  ·  ctrl-s save  ·  esc back",
    );
}

fn render_field(frame: &mut Frame, area: Rect, form: &FormScreen, field: FormField) {
    let focused = form.focus == field;
    let border = if focused { Color::Cyan } else { Color::DarkGray };

    let mut spans = vec![Span::styled(
        field.value(&form.credentials),
        Style::default().fg(Color::Yellow),
    )];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", field.label()))
            .title_style(Style::default().fg(border))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
