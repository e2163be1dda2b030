use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::answers::json::{display_text, scalar_text};

/// One material returned by the catalogue search.
///
/// Only the fields the front-end reads are typed; everything else is kept
/// so the item can be handed back to callers untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::decodable_only")]
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchItem {
    /// First non-empty of name, title and alias.
    pub fn display_name(&self) -> &str {
        [&self.name, &self.title, &self.alias]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn id_text(&self) -> String {
        display_text(&self.id)
    }

    /// The id as a test id, when it is numeric.
    pub fn test_id(&self) -> Option<i64> {
        match &self.id {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn has_tag(&self, name: &str, kind: &str) -> bool {
        self.tags.iter().any(|tag| tag.matches(name, kind))
    }
}

/// A catalogue tag. Older payloads name the type field `tag_type`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    /// Case-insensitive match on both the tag name and its type.
    pub fn matches(&self, name: &str, kind: &str) -> bool {
        let own_name = lowered(self.name.as_ref());
        let own_kind = {
            let primary = lowered(self.kind.as_ref());
            if primary.is_empty() {
                lowered(self.tag_type.as_ref())
            } else {
                primary
            }
        };

        own_name == name.to_lowercase() && own_kind == kind.to_lowercase()
    }
}

fn lowered(value: Option<&Value>) -> String {
    value
        .and_then(scalar_text)
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_fallbacks() {
        let item: SearchItem =
            serde_json::from_value(json!({"id": 1, "name": "", "title": "Fractions"})).unwrap();
        assert_eq!(item.display_name(), "Fractions");

        let item: SearchItem = serde_json::from_value(json!({"id": 2, "alias": "frac"})).unwrap();
        assert_eq!(item.display_name(), "frac");
    }

    #[test]
    fn test_tag_matching_is_case_insensitive() {
        let tag: Tag = serde_json::from_value(json!({"name": "ЦДЗ", "type": "Special"})).unwrap();
        assert!(tag.matches("цдз", "special"));

        let legacy: Tag = serde_json::from_value(json!({"name": "цдз", "tag_type": "SPECIAL"})).unwrap();
        assert!(legacy.matches("цдз", "special"));

        let other: Tag = serde_json::from_value(json!({"name": "цдз", "type": "subject"})).unwrap();
        assert!(!other.matches("цдз", "special"));
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let item: SearchItem = serde_json::from_value(json!({
            "id": "77",
            "name": "Test",
            "type": "test_spec",
            "author": "someone"
        }))
        .unwrap();
        assert_eq!(item.test_id(), Some(77));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["author"], "someone");
        assert_eq!(back["type"], "test_spec");
    }

    #[test]
    fn test_mistyped_fields_keep_the_item() {
        let item: SearchItem = serde_json::from_value(json!({
            "id": 9,
            "name": 5,
            "type": null,
            "tags": [{"name": "цдз", "type": "special"}, null, "topic"]
        }))
        .unwrap();

        assert_eq!(item.display_name(), "5");
        assert_eq!(item.kind, None);
        assert_eq!(item.tags.len(), 1);
        assert!(item.has_tag("цдз", "special"));
    }
}
