use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Credentials;

pub const DEFAULT_FILE_NAME: &str = "upstream-headers.json";

/// Error type for credential store writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode credentials: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Credentials persisted as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default file name inside `data_dir`.
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::new(data_dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored credentials.
    ///
    /// A missing or unreadable file yields the empty, unconfigured default.
    pub fn read(&self) -> Credentials {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no credentials file yet");
                return Credentials::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read credentials");
                return Credentials::default();
            }
        };

        if content.trim().is_empty() {
            return Credentials::default();
        }

        serde_json::from_str(&content).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "failed to parse credentials");
            Credentials::default()
        })
    }

    /// Replaces the stored credentials, creating parent directories.
    pub fn write(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(credentials)?;
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, json).map_err(io_err)?;

        debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Credentials {
        Credentials {
            user_id: "17".to_string(),
            profile_id: "42".to_string(),
            authorization: "Bearer abc".to_string(),
            profile: "{}".to_string(),
            cookie: String::new(),
        }
    }

    #[test]
    fn test_missing_file_reads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        assert_eq!(store.read(), Credentials::default());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("nested/deeper/headers.json"));

        store.write(&sample()).unwrap();
        assert_eq!(store.read(), sample());

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"User-Id\": \"17\""));
    }

    #[test]
    fn test_garbage_file_reads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.read(), Credentials::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        fs::write(store.path(), r#"{"Authorization": "Bearer x"}"#).unwrap();

        let creds = store.read();
        assert_eq!(creds.authorization, "Bearer x");
        assert_eq!(creds.user_id, "");
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let store = CredentialStore::new(blocker.join("headers.json"));
        assert!(matches!(store.write(&sample()), Err(StoreError::Io { .. })));
    }
}
