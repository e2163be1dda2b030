//! Upstream credentials: the headers sent to the catalogue, their on-disk
//! store and the password gate guarding edits.

mod gate;
mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use gate::AdminGate;
pub use store::{CredentialStore, StoreError, DEFAULT_FILE_NAME};

/// Header values identifying the operator to the upstream service.
///
/// An empty `Authorization` means no credentials have been configured yet.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "User-Id", default)]
    pub user_id: String,
    #[serde(rename = "Profile-Id", default)]
    pub profile_id: String,
    #[serde(rename = "Authorization", default)]
    pub authorization: String,
    /// Profile payload, a JSON document kept as text.
    #[serde(rename = "Profile", default)]
    pub profile: String,
    #[serde(rename = "Cookie", default, skip_serializing_if = "String::is_empty")]
    pub cookie: String,
}

impl Credentials {
    pub fn is_configured(&self) -> bool {
        !self.authorization.trim().is_empty()
    }

    /// Header name/value pairs for every non-empty field.
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        [
            ("User-Id", self.user_id.as_str()),
            ("Profile-Id", self.profile_id.as_str()),
            ("Profile", self.profile.as_str()),
            ("Authorization", self.authorization.as_str()),
            ("Cookie", self.cookie.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "<empty>" } else { "<redacted>" }
        }

        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("profile_id", &self.profile_id)
            .field("authorization", &redact(&self.authorization))
            .field("profile", &redact(&self.profile))
            .field("cookie", &redact(&self.cookie))
            .finish()
    }
}
