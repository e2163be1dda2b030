/// Failures talking to the catalogue service.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The service rejected the configured credentials.
    #[error("upstream rejected the credentials (401 Unauthorized)")]
    Unauthorized,

    /// No credentials have been entered yet.
    #[error("no upstream credentials configured")]
    NotConfigured,

    /// The service answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Credential problems the operator can fix from the admin screen.
    pub fn is_credential_error(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::NotConfigured)
    }
}
