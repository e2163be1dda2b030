//! Request and response bodies of the HTTP API.
//!
//! All bodies are JSON.

use serde::{Deserialize, Serialize};

use crate::answers::{build_transcript, task_views, TaskView};
use crate::models::{SearchItem, Test};

/// Header carrying the admin password.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Query string of `GET /api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

/// Body of a successful search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<SearchItem>,
}

/// Body of any JSON error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// A test with every task's answers already rendered.
#[derive(Debug, Clone, Serialize)]
pub struct TestResponse {
    pub name: String,
    pub tasks: Vec<TaskView>,
    pub transcript: String,
}

impl From<&Test> for TestResponse {
    fn from(test: &Test) -> Self {
        Self {
            name: test.name.clone(),
            tasks: task_views(test),
            transcript: build_transcript(test),
        }
    }
}
