//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{Action, App, Screen, Status};

const PAGE: usize = 10;

/// Applies `key` to `app`; returns the work the event loop must do, if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }

    match &mut app.screen {
        Screen::Search(search) => match key.code {
            KeyCode::Esc => {
                app.should_quit = true;
                None
            }
            KeyCode::F(2) => {
                app.open_admin_login();
                None
            }
            KeyCode::Up => {
                app.select_previous_result();
                None
            }
            KeyCode::Down => {
                app.select_next_result();
                None
            }
            KeyCode::Enter if search.results_are_current() => {
                match search.selected_item().map(|item| (item.test_id(), item.id_text())) {
                    Some((Some(test_id), _)) => Some(Action::OpenTest(test_id)),
                    Some((None, id)) => {
                        app.set_search_status(Status::error(format!(
                            "\"{}\" is not a test id",
                            id
                        )));
                        None
                    }
                    None => None,
                }
            }
            KeyCode::Enter => {
                let query = search.input.trim().to_string();
                if query.is_empty() {
                    return None;
                }
                app.begin_search(&query);
                Some(Action::Search(query))
            }
            KeyCode::Backspace => {
                app.search_input_pop();
                None
            }
            KeyCode::Char(c) if !ctrl => {
                app.search_input_push(c);
                None
            }
            _ => None,
        },
        Screen::Test(test) => match key.code {
            KeyCode::Char('q') => {
                app.should_quit = true;
                None
            }
            KeyCode::Esc | KeyCode::Backspace => {
                app.back_to_search();
                None
            }
            KeyCode::Char('c') => Some(Action::SaveTranscript {
                test_id: test.test_id,
                transcript: test.transcript.clone(),
            }),
            KeyCode::Down | KeyCode::Char('j') => {
                app.scroll_down(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.scroll_up(1);
                None
            }
            KeyCode::PageDown | KeyCode::Char(' ') => {
                app.scroll_down(PAGE);
                None
            }
            KeyCode::PageUp => {
                app.scroll_up(PAGE);
                None
            }
            _ => None,
        },
        Screen::AdminLogin(login) => match key.code {
            KeyCode::Esc => {
                app.back_to_search();
                None
            }
            KeyCode::Enter => Some(Action::CheckPassword(login.password.clone())),
            KeyCode::Backspace => {
                app.password_pop();
                None
            }
            KeyCode::Char(c) if !ctrl => {
                app.password_push(c);
                None
            }
            _ => None,
        },
        Screen::AdminForm(form) => match key.code {
            KeyCode::Esc => {
                app.back_to_search();
                None
            }
            KeyCode::Char('s') if ctrl => Some(Action::SaveCredentials(form.credentials.clone())),
            KeyCode::Tab | KeyCode::Down => {
                form.focus = form.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus = form.focus.previous();
                None
            }
            KeyCode::Backspace => {
                form.pop();
                None
            }
            KeyCode::Char(c) if !ctrl => {
                form.push(c);
                None
            }
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;
    use crate::models::SearchItem;
    use crate::tui::state::FormField;
    use serde_json::json;

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> Option<Action> {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_searches_then_opens() {
        let mut app = App::new();
        assert_eq!(press(&mut app, KeyCode::Enter), None);

        type_text(&mut app, " geometry ");
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Action::Search("geometry".to_string()))
        );

        let item = SearchItem {
            id: json!("314"),
            ..SearchItem::default()
        };
        app.finish_search("geometry".to_string(), Ok(vec![item]));
        // Input still has surrounding spaces; results match the trimmed query.
        assert_eq!(press(&mut app, KeyCode::Enter), Some(Action::OpenTest(314)));
    }

    #[test]
    fn test_non_numeric_id_is_reported() {
        let mut app = App::new();
        type_text(&mut app, "q");
        let item = SearchItem {
            id: json!("abc"),
            ..SearchItem::default()
        };
        app.finish_search("q".to_string(), Ok(vec![item]));

        assert_eq!(press(&mut app, KeyCode::Enter), None);
        let Screen::Search(search) = &app.screen else {
            panic!("expected search screen");
        };
        assert!(search.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        type_text(&mut app, "q");
        assert!(!app.should_quit);

        ctrl(&mut app, 'c');
        assert!(app.should_quit);

        let mut app = App::new();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_admin_keys() {
        let mut app = App::new();
        press(&mut app, KeyCode::F(2));
        type_text(&mut app, "pw");
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Action::CheckPassword("pw".to_string()))
        );

        app.finish_login(true, Credentials::default());
        type_text(&mut app, "7");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Bearer x");

        let Screen::AdminForm(form) = &app.screen else {
            panic!("expected form screen");
        };
        assert_eq!(form.focus, FormField::Authorization);

        let expected = Credentials {
            user_id: "7".to_string(),
            authorization: "Bearer x".to_string(),
            ..Credentials::default()
        };
        assert_eq!(ctrl(&mut app, 's'), Some(Action::SaveCredentials(expected)));

        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.screen, Screen::Search(_)));
    }
}
