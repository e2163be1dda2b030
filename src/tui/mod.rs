//! Terminal UI: search the catalogue, read a test's answers, edit the
//! upstream credentials.

mod input;
pub mod state;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};

use crate::config::Settings;
use crate::credentials::{AdminGate, CredentialStore};
use crate::terminal::TerminalGuard;
use crate::upstream::UpstreamClient;

pub use input::handle_key;
pub use state::{Action, App, Screen};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Everything the event loop needs to carry out an [`Action`].
struct Services {
    client: UpstreamClient,
    store: CredentialStore,
    gate: AdminGate,
    transcript_dir: PathBuf,
}

/// Runs the TUI until the user quits.
pub async fn run(settings: &Settings) -> Result<(), crate::Error> {
    let services = Services {
        client: settings.upstream_client()?,
        store: settings.credential_store(),
        gate: settings.admin_gate(),
        transcript_dir: settings.transcript_dir(),
    };
    let mut app = App::new();

    if !services.store.read().is_configured() {
        app.set_search_status(state::Status::info(
            "No upstream credentials yet. Press F2 to enter them.",
        ));
    }

    let mut terminal = TerminalGuard::enter()?;
    info!("terminal UI started");

    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(action) = handle_key(&mut app, key) {
            // Show the "working" state before blocking on the network.
            terminal.draw(|frame| ui::render(frame, &app))?;
            perform(&mut app, &services, action).await;
        }
    }

    info!("terminal UI closed");
    Ok(())
}

async fn perform(app: &mut App, services: &Services, action: Action) {
    match action {
        Action::Search(query) => {
            let credentials = services.store.read();
            let result = services.client.search(&credentials, &query).await;
            app.finish_search(query, result);
        }
        Action::OpenTest(test_id) => {
            let credentials = services.store.read();
            let result = services.client.fetch_test(&credentials, test_id).await;
            app.finish_open_test(test_id, result);
        }
        Action::CheckPassword(password) => {
            let accepted = services.gate.check(&password);
            if !accepted {
                info!("admin login rejected");
            }
            app.finish_login(accepted, services.store.read());
        }
        Action::SaveCredentials(credentials) => {
            let result = services.store.write(&credentials);
            if let Err(err) = &result {
                error!("failed to save credentials: {}", err);
            }
            app.finish_save_credentials(result);
        }
        Action::SaveTranscript { test_id, transcript } => {
            match save_transcript(&services.transcript_dir, test_id, &transcript) {
                Ok(path) => {
                    info!(test_id, path = %path.display(), "transcript saved");
                    app.finish_save_transcript(Ok(path.as_path()));
                }
                Err(err) => {
                    error!(test_id, "failed to save transcript: {}", err);
                    app.finish_save_transcript(Err(err));
                }
            }
        }
    }
}

/// Writes `transcript` to `<dir>/test-<id>.txt`, replacing any earlier copy.
pub fn save_transcript(dir: &Path, test_id: i64, transcript: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("test-{}.txt", test_id));
    fs::write(&path, transcript)?;
    Ok(path)
}
