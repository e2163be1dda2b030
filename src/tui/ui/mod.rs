mod admin;
mod search;
mod test_view;

use ratatui::{prelude::*, widgets::Block, widgets::Paragraph};

use super::state::{App, Screen, Status};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Search(search) => search::render(frame, area, search),
        Screen::Test(test) => test_view::render(frame, area, test),
        Screen::AdminLogin(login) => admin::render_login(frame, area, login),
        Screen::AdminForm(form) => admin::render_form(frame, area, form),
    }
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&Status>) {
    let Some(status) = status else {
        return;
    };
    let color = if status.is_error { Color::Red } else { Color::Green };
    let widget = Paragraph::new(status.text.as_str())
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
