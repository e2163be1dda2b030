use serde::Serialize;
use serde_json::Value;

use crate::answers::json::scalar_text;

/// A selectable answer option, as found in an option pool.
///
/// Upstream options carry their display text under one of several field
/// names. At most one is populated in practice, but nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnswerOption {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reads an option out of a raw JSON object.
    ///
    /// Returns `None` when the value is not an object or has no usable id.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = object.get("id").and_then(scalar_text)?;
        let field = |key: &str| object.get(key).and_then(scalar_text);

        Some(Self {
            id,
            text: field("text"),
            name: field("name"),
            label: field("label"),
            value: field("value"),
            title: field("title"),
        })
    }

    /// Reads every well-formed option from a JSON array, in order.
    pub fn pool_from_value(value: &Value) -> Option<Vec<Self>> {
        let items = value.as_array()?;
        Some(items.iter().filter_map(Self::from_value).collect())
    }

    /// The first non-empty text-bearing field, in priority order.
    pub fn display_text(&self) -> Option<&str> {
        [&self.text, &self.name, &self.label, &self.value, &self.title]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|text| !text.is_empty())
    }
}
