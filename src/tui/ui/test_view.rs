//! Question and answer cards of one test.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::answers::normalizer::NO_ANSWERS;
use crate::answers::TaskView;
use crate::tui::state::TestScreen;

pub fn render(frame: &mut Frame, area: Rect, test: &TestScreen) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], test);
    render_tasks(frame, chunks[1], &test.views, test.scroll);
    super::render_status(frame, chunks[2], test.status.as_ref());
    super::render_controls(
        frame,
        chunks[3],
        "j/k scroll  ·  c save transcript  ·  esc back  ·  q quit",
    );
}

fn render_header(frame: &mut Frame, area: Rect, test: &TestScreen) {
    let line = Line::from(vec![
        Span::styled(test.name.as_str(), Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("  #{}  ·  {} tasks", test.test_id, test.views.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn task_lines(view: &TaskView) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Task {}", view.index),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(
            view.question.as_str(),
            Style::default().fg(Color::White),
        )),
    ];

    if view.answers.is_empty() {
        lines.push(Line::from(Span::styled(
            NO_ANSWERS,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for answer in &view.answers {
            lines.extend(answer_lines(answer));
        }
    }

    lines.push(Line::from(""));
    lines
}

/// One row per line of `answer`; continuation rows are indented under the marker.
fn answer_lines(answer: &str) -> Vec<Line<'_>> {
    let style = Style::default().fg(Color::Green);
    let mut rows: Vec<&str> = answer.lines().collect();
    if rows.is_empty() {
        rows.push("");
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = if i == 0 { " + " } else { "   " };
            Line::from(vec![Span::styled(marker, style), Span::styled(row, style)])
        })
        .collect()
}

fn render_tasks(frame: &mut Frame, area: Rect, views: &[TaskView], scroll: usize) {
    let lines: Vec<Line> = views.iter().flat_map(task_lines).collect();

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_multi_line_answer_becomes_rows() {
        let rows = answer_lines("{\n  \"foo\": 1\n}");
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec![" + {", "     \"foo\": 1", "   }"]);
    }

    #[test]
    fn test_task_lines_match_content_height() {
        let view = TaskView {
            index: 1,
            question: "Q".to_string(),
            answers: vec!["one".to_string(), "a\nb".to_string()],
        };
        let screen = TestScreen {
            test_id: 1,
            name: "T".to_string(),
            views: vec![view.clone()],
            transcript: String::new(),
            scroll: 0,
            status: None,
        };
        assert_eq!(task_lines(&view).len(), screen.content_height());
    }
}
