//! Runtime settings shared by the terminal UI and the HTTP server.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::credentials::{AdminGate, CredentialStore};
use crate::upstream::{FetchError, UpstreamClient};

/// Default HTTP port for `serve`.
pub const DEFAULT_PORT: u16 = 8712;

pub const DEFAULT_DATA_DIR: &str = "data";

pub const LOG_FILE_NAME: &str = "catalogue-answers.log";

/// Resolved configuration, passed explicitly to every component.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub upstream_url: String,
    pub admin_password: Option<String>,
}

impl Settings {
    pub fn new(data_dir: impl Into<PathBuf>, upstream_url: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            upstream_url: upstream_url.into(),
            admin_password: None,
        }
    }

    pub fn with_admin_password(mut self, password: Option<String>) -> Self {
        self.admin_password = password;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::in_dir(&self.data_dir)
    }

    pub fn admin_gate(&self) -> AdminGate {
        AdminGate::new(self.admin_password.clone())
    }

    pub fn upstream_client(&self) -> Result<UpstreamClient, FetchError> {
        UpstreamClient::new(self.upstream_url.clone())
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// Where the terminal UI saves transcripts.
    pub fn transcript_dir(&self) -> PathBuf {
        self.data_dir.join("transcripts")
    }
}

pub fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
}
