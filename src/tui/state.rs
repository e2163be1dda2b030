//! TUI state management.

use std::path::Path;

use crate::answers::{task_views, TaskView};
use crate::credentials::Credentials;
use crate::models::{SearchItem, Test};
use crate::upstream::FetchError;

const MAX_INPUT_LENGTH: usize = 200;

/// A one-line message shown under the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    fn from_fetch(err: &FetchError) -> Self {
        match err {
            FetchError::NotConfigured => {
                Self::error("No upstream credentials configured. Press F2 to enter them.")
            }
            FetchError::Unauthorized => {
                Self::error("The catalogue rejected the credentials. Press F2 to update them.")
            }
            other => Self::error(other.to_string()),
        }
    }
}

/// Catalogue search: query input and the matching tests.
#[derive(Debug, Clone, Default)]
pub struct SearchScreen {
    pub input: String,
    /// Query the current results belong to.
    pub last_query: Option<String>,
    pub results: Vec<SearchItem>,
    pub selected: usize,
    pub status: Option<Status>,
}

impl SearchScreen {
    pub fn selected_item(&self) -> Option<&SearchItem> {
        self.results.get(self.selected)
    }

    /// True when Enter should open the selection rather than search again.
    pub fn results_are_current(&self) -> bool {
        !self.results.is_empty() && self.last_query.as_deref() == Some(self.input.trim())
    }
}

/// One fetched test with every task rendered.
#[derive(Debug, Clone)]
pub struct TestScreen {
    pub test_id: i64,
    pub name: String,
    pub views: Vec<TaskView>,
    pub transcript: String,
    pub scroll: usize,
    pub status: Option<Status>,
}

impl TestScreen {
    pub fn new(test_id: i64, test: &Test) -> Self {
        Self {
            test_id,
            name: test.name.clone(),
            views: task_views(test),
            transcript: crate::answers::build_transcript(test),
            scroll: 0,
            status: None,
        }
    }

    /// Rendered height before wrapping: header, question, answer rows and a
    /// gap per task. Multi-line answers take one row per line.
    pub fn content_height(&self) -> usize {
        self.views
            .iter()
            .map(|view| 3 + answer_rows(&view.answers).max(1))
            .sum()
    }
}

/// Number of terminal rows `answers` occupy before wrapping.
pub fn answer_rows(answers: &[String]) -> usize {
    answers.iter().map(|answer| answer.lines().count().max(1)).sum()
}

#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    pub password: String,
    pub error: Option<String>,
}

/// Field of the credential form that receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    UserId,
    ProfileId,
    Authorization,
    Profile,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::UserId,
        FormField::ProfileId,
        FormField::Authorization,
        FormField::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::UserId => "User-Id",
            FormField::ProfileId => "Profile-Id",
            FormField::Authorization => "Authorization",
            FormField::Profile => "Profile",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::UserId => FormField::ProfileId,
            FormField::ProfileId => FormField::Authorization,
            FormField::Authorization => FormField::Profile,
            FormField::Profile => FormField::UserId,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::UserId => FormField::Profile,
            FormField::ProfileId => FormField::UserId,
            FormField::Authorization => FormField::ProfileId,
            FormField::Profile => FormField::Authorization,
        }
    }

    pub fn value(self, credentials: &Credentials) -> &str {
        match self {
            FormField::UserId => &credentials.user_id,
            FormField::ProfileId => &credentials.profile_id,
            FormField::Authorization => &credentials.authorization,
            FormField::Profile => &credentials.profile,
        }
    }

    fn value_mut(self, credentials: &mut Credentials) -> &mut String {
        match self {
            FormField::UserId => &mut credentials.user_id,
            FormField::ProfileId => &mut credentials.profile_id,
            FormField::Authorization => &mut credentials.authorization,
            FormField::Profile => &mut credentials.profile,
        }
    }
}

/// Credential editor, reachable only through the login screen.
#[derive(Debug, Clone, Default)]
pub struct FormScreen {
    pub credentials: Credentials,
    pub focus: FormField,
    pub status: Option<Status>,
}

impl FormScreen {
    pub fn push(&mut self, c: char) {
        self.focus.value_mut(&mut self.credentials).push(c);
        self.status = None;
    }

    pub fn pop(&mut self) {
        self.focus.value_mut(&mut self.credentials).pop();
        self.status = None;
    }
}

/// Current screen.
#[derive(Debug, Clone)]
pub enum Screen {
    Search(SearchScreen),
    Test(TestScreen),
    AdminLogin(LoginScreen),
    AdminForm(FormScreen),
}

impl Default for Screen {
    fn default() -> Self {
        Self::Search(SearchScreen::default())
    }
}

/// Work the event loop must perform on behalf of a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Search(String),
    OpenTest(i64),
    CheckPassword(String),
    SaveCredentials(Credentials),
    SaveTranscript { test_id: i64, transcript: String },
}

/// TUI application state.
#[derive(Debug, Default)]
pub struct App {
    pub screen: Screen,
    /// Search screen kept while another screen is shown.
    parked_search: Option<SearchScreen>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns to search, restoring the previous query and results.
    pub fn back_to_search(&mut self) {
        let search = self.parked_search.take().unwrap_or_default();
        self.screen = Screen::Search(search);
    }

    fn park_search(&mut self) {
        if let Screen::Search(search) = &mut self.screen {
            self.parked_search = Some(std::mem::take(search));
        }
    }

    pub fn open_admin_login(&mut self) {
        self.park_search();
        self.screen = Screen::AdminLogin(LoginScreen::default());
    }

    pub fn search_input_push(&mut self, c: char) {
        if let Screen::Search(search) = &mut self.screen {
            if search.input.chars().count() < MAX_INPUT_LENGTH {
                search.input.push(c);
            }
        }
    }

    pub fn search_input_pop(&mut self) {
        if let Screen::Search(search) = &mut self.screen {
            search.input.pop();
        }
    }

    pub fn select_next_result(&mut self) {
        if let Screen::Search(search) = &mut self.screen {
            if !search.results.is_empty() {
                search.selected = (search.selected + 1) % search.results.len();
            }
        }
    }

    pub fn select_previous_result(&mut self) {
        if let Screen::Search(search) = &mut self.screen {
            let len = search.results.len();
            if len > 0 {
                search.selected = (search.selected + len - 1) % len;
            }
        }
    }

    /// Marks a search as running.
    pub fn begin_search(&mut self, query: &str) {
        if let Screen::Search(search) = &mut self.screen {
            search.status = Some(Status::info(format!("Searching for \"{}\"...", query)));
        }
    }

    pub fn finish_search(&mut self, query: String, result: Result<Vec<SearchItem>, FetchError>) {
        let Screen::Search(search) = &mut self.screen else {
            return;
        };

        match result {
            Ok(items) => {
                search.status = if items.is_empty() {
                    Some(Status::info(format!("No tests found for \"{}\"", query)))
                } else {
                    None
                };
                search.results = items;
                search.selected = 0;
                search.last_query = Some(query);
            }
            Err(err) => {
                search.status = Some(Status::from_fetch(&err));
                search.results.clear();
                search.selected = 0;
                search.last_query = None;
            }
        }
    }

    /// Shows an informational message on the search screen.
    pub fn set_search_status(&mut self, status: Status) {
        if let Screen::Search(search) = &mut self.screen {
            search.status = Some(status);
        }
    }

    /// Switches to the test screen, or reports the failure on search.
    pub fn finish_open_test(&mut self, test_id: i64, result: Result<Test, FetchError>) {
        match result {
            Ok(test) if test.is_empty() => {
                self.set_search_status(Status::error(format!(
                    "Test {} could not be loaded",
                    test_id
                )));
            }
            Ok(test) => {
                self.park_search();
                self.screen = Screen::Test(TestScreen::new(test_id, &test));
            }
            Err(err) => self.set_search_status(Status::from_fetch(&err)),
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        if let Screen::Test(test) = &mut self.screen {
            let max_scroll = test.content_height().saturating_sub(1);
            test.scroll = (test.scroll + lines).min(max_scroll);
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        if let Screen::Test(test) = &mut self.screen {
            test.scroll = test.scroll.saturating_sub(lines);
        }
    }

    pub fn finish_save_transcript(&mut self, result: std::io::Result<&Path>) {
        if let Screen::Test(test) = &mut self.screen {
            test.status = Some(match result {
                Ok(path) => Status::info(format!("Transcript saved to {}", path.display())),
                Err(err) => Status::error(format!("Could not save transcript: {}", err)),
            });
        }
    }

    pub fn password_push(&mut self, c: char) {
        if let Screen::AdminLogin(login) = &mut self.screen {
            login.password.push(c);
            login.error = None;
        }
    }

    pub fn password_pop(&mut self) {
        if let Screen::AdminLogin(login) = &mut self.screen {
            login.password.pop();
            login.error = None;
        }
    }

    /// Opens the form with `credentials` when the password was accepted.
    pub fn finish_login(&mut self, accepted: bool, credentials: Credentials) {
        if !matches!(self.screen, Screen::AdminLogin(_)) {
            return;
        }

        if accepted {
            self.screen = Screen::AdminForm(FormScreen {
                credentials,
                ..FormScreen::default()
            });
        } else if let Screen::AdminLogin(login) = &mut self.screen {
            login.password.clear();
            login.error = Some("Wrong password".to_string());
        }
    }

    pub fn finish_save_credentials<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        if let Screen::AdminForm(form) = &mut self.screen {
            form.status = Some(match result {
                Ok(()) => Status::info("Credentials saved"),
                Err(err) => Status::error(format!("Write error: {}", err)),
            });
        }
    }
}
