//! Decoding of upstream response bodies.

use serde_json::{json, Value};
use tracing::warn;

use crate::answers::json::scalar_text;
use crate::models::{SearchItem, Task, Test};

/// Tag name marking materials that carry answer specs.
pub const SPECIAL_TAG_NAME: &str = "цдз";
/// Tag type accompanying [`SPECIAL_TAG_NAME`].
pub const SPECIAL_TAG_TYPE: &str = "special";

pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Builds a [`Test`] from a test-spec response.
///
/// The name lives under `basic_info.name` and the tasks under the first
/// test group. Returns `None` when either is missing. Task entries that are
/// not objects are skipped rather than failing the whole test.
pub fn parse_test(body: &Value) -> Option<Test> {
    let name = body.pointer("/basic_info/name").and_then(scalar_text)?;
    let raw_tasks = body.pointer("/test_groups/0/tasks")?;
    let tasks = Task::list_from_value(raw_tasks)?;

    let skipped = raw_tasks.as_array().map_or(0, Vec::len) - tasks.len();
    if skipped > 0 {
        warn!(skipped, "dropped malformed test tasks");
    }

    Some(Test::new(name, tasks))
}

/// Reads the `data` array of a search response, dropping malformed items.
pub fn parse_search(body: &Value) -> Vec<SearchItem> {
    let Some(items) = body.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

/// Keeps only materials tagged as special answer-bearing tests.
pub fn filter_special(items: Vec<SearchItem>) -> Vec<SearchItem> {
    items
        .into_iter()
        .filter(|item| item.has_tag(SPECIAL_TAG_NAME, SPECIAL_TAG_TYPE))
        .collect()
}

pub fn search_body(query: &str) -> Value {
    json!({
        "query": { "search": query },
        "sort": { "field": "score", "order": "desc" },
        "page": 1,
        "per_page": SEARCH_PAGE_SIZE,
        "scope": "catalogue",
    })
}
