//! # catalogue-answers
//!
//! Looks up tests in an external educational catalogue and shows each
//! question together with its correct answer, extracted from the
//! catalogue's loosely-typed answer schema.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use catalogue_answers::{build_transcript, Settings, UpstreamClient};
//!
//! # async fn demo() -> Result<(), catalogue_answers::Error> {
//! let settings = Settings::new("data", catalogue_answers::upstream::DEFAULT_BASE_URL);
//! let credentials = settings.credential_store().read();
//! let client = UpstreamClient::new(settings.upstream_url.clone())?;
//!
//! let test = client.fetch_test(&credentials, 12345).await?;
//! println!("{}", build_transcript(&test));
//! # Ok(())
//! # }
//! ```

pub mod answers;
pub mod config;
pub mod credentials;
pub mod logging;
pub mod models;
pub mod server;
pub mod terminal;
pub mod tui;
pub mod upstream;

use std::io;

pub use answers::{build_transcript, correct_answer_text, resolve_option_text, OptionResolver};
pub use config::Settings;
pub use credentials::{AdminGate, CredentialStore, Credentials, StoreError};
pub use models::{AnswerOption, SearchItem, Task, Test, TestTaskAnswer};
pub use upstream::{FetchError, UpstreamClient};

/// Error type for the application entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Talking to the catalogue failed.
    #[error("catalogue request failed: {0}")]
    Fetch(#[from] FetchError),
    /// Saving credentials failed.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
    /// IO error while serving or drawing the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
