//! Correct-answer rendering.
//!
//! Turns a task's answer into display lines by trying each structural
//! [`AnswerShape`] it matches, in precedence order. Rendering never fails:
//! the last candidate is always a JSON dump of the raw answer.

use serde_json::Value;
use tracing::debug;

use super::json::{display_text, in_property_order, is_truthy, natural_entries};
use super::resolver::OptionResolver;
use super::shape::AnswerShape;
use crate::models::{Task, Test};

pub const NO_ANSWERS: &str = "No answers";
pub const NO_DATA: &str = "No data";
pub const NO_MATCHES: &str = "(no matches)";
/// Shown for a gap or inline position that names no option.
pub const NO_SELECTION: &str = "(no selection)";

/// Human-readable correct answer(s) for `task`, in display order.
///
/// `test` is the enclosing test, used to resolve option ids that are not in
/// the task's own pool.
pub fn correct_answer_text(task: &Task, test: Option<&Test>) -> Vec<String> {
    let answer = task.answer();
    let resolver = OptionResolver::new(answer.options(), test);

    AnswerShape::candidates(answer)
        .into_iter()
        .find_map(|shape| {
            let lines = shape.render(&resolver);
            if lines.is_none() {
                debug!(kind = answer.kind(), "answer shape produced nothing, falling through");
            }
            lines
        })
        .unwrap_or_else(|| vec![NO_DATA.to_string()])
}

impl AnswerShape<'_> {
    /// Renders this shape. `None` means the shape declined and the next
    /// candidate should be tried.
    pub fn render(&self, resolver: &OptionResolver<'_>) -> Option<Vec<String>> {
        let lines = match self {
            Self::Single(id) => vec![resolver.resolve_value(id)],
            Self::Strings(strings) => strings.iter().map(display_text).collect(),
            Self::Numbers(numbers) => numbers.iter().map(display_text).collect(),
            Self::Multiple(ids) | Self::Ids(ids) => resolve_all(resolver, ids),
            Self::Order(ids) => numbered(resolve_all(resolver, ids)),
            Self::Match(pairs) => natural_entries(pairs)
                .into_iter()
                .map(|(source, targets)| render_match(resolver, source, targets))
                .collect(),
            Self::Gap(positions) => numbered(resolve_positions(resolver, positions)),
            Self::Inline(positions) => resolve_positions(resolver, positions),
            Self::Answers(entries) => return render_answers(resolver, entries),
            Self::Table(cells) => or_placeholder(render_table(cells)),
            Self::Groups(groups) => or_placeholder(render_groups(resolver, groups)),
            Self::Dump(value) => vec![dump(value)],
        };

        Some(lines)
    }
}

fn resolve_all(resolver: &OptionResolver<'_>, ids: &[Value]) -> Vec<String> {
    ids.iter().map(|id| resolver.resolve_value(id)).collect()
}

fn resolve_positions(resolver: &OptionResolver<'_>, positions: &[Value]) -> Vec<String> {
    positions
        .iter()
        .map(|position| match position.get("id").filter(|id| !id.is_null()) {
            Some(id) => resolver.resolve_value(id),
            None => NO_SELECTION.to_string(),
        })
        .collect()
}

fn numbered(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", i + 1, line))
        .collect()
}

fn render_match(resolver: &OptionResolver<'_>, source: &str, targets: &Value) -> String {
    let left = resolver.resolve(source);
    let rights: Vec<String> = targets
        .as_array()
        .map(|ids| resolve_all(resolver, ids))
        .unwrap_or_default();

    let arrow = if rights.len() > 1 { " ↦ " } else { " → " };
    let joined = if rights.is_empty() {
        NO_MATCHES.to_string()
    } else {
        rights.join(", ")
    };

    format!("{}{}{}", left, arrow, joined)
}

/// Entries carry literal `strings`/`string` arrays or an option `id`.
/// Declines when no entry yields anything.
fn render_answers(resolver: &OptionResolver<'_>, entries: &[Value]) -> Option<Vec<String>> {
    let mut lines = Vec::new();

    for entry in entries {
        let literal = ["strings", "string"]
            .iter()
            .find_map(|key| entry.get(*key).and_then(Value::as_array));

        if let Some(strings) = literal {
            lines.extend(strings.iter().map(display_text));
        } else if let Some(id) = entry.get("id").filter(|id| is_truthy(id)) {
            lines.push(resolver.resolve_value(id));
        }
    }

    if lines.is_empty() { None } else { Some(lines) }
}

fn render_table(cells: &Value) -> Vec<String> {
    let mut lines = Vec::new();

    for (row, columns) in keyed_entries(cells) {
        for (column, texts) in keyed_entries(columns) {
            let Some(texts) = texts.as_array().filter(|t| !t.is_empty()) else {
                continue;
            };
            let texts: Vec<String> = texts.iter().map(display_text).collect();
            lines.push(format!(
                "Column {}, row {}: {}",
                offset_label(&column, 1),
                offset_label(&row, -1),
                texts.join(", ")
            ));
        }
    }

    lines
}

fn render_groups(resolver: &OptionResolver<'_>, groups: &Value) -> Vec<String> {
    let Some(groups) = groups.as_array() else {
        return Vec::new();
    };

    groups
        .iter()
        .map(|group| {
            let name = resolver.resolve_value(group.get("group_id").unwrap_or(&Value::Null));
            let members = group
                .get("options_ids")
                .and_then(Value::as_array)
                .map(|ids| resolve_all(resolver, ids))
                .unwrap_or_default();
            format!("{}: {}", name, members.join(", "))
        })
        .collect()
}

fn or_placeholder(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        vec![NO_ANSWERS.to_string()]
    } else {
        lines
    }
}

fn dump(value: &Value) -> String {
    serde_json::to_string_pretty(&in_property_order(value)).unwrap_or_else(|_| NO_DATA.to_string())
}

/// Object entries in property order, or array entries by index.
fn keyed_entries(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Object(map) => natural_entries(map)
            .into_iter()
            .map(|(key, v)| (key.clone(), v))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Shifts a numeric key by `offset`; other keys are shown as-is.
fn offset_label(key: &str, offset: i64) -> String {
    match key.trim().parse::<i64>() {
        Ok(n) => n.saturating_add(offset).to_string(),
        Err(_) => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestTaskAnswer;
    use serde_json::json;

    fn pool() -> Value {
        json!([
            {"id": "a1", "text": "Cat"},
            {"id": "a2", "text": "Dog"},
            {"id": "a3", "text": "Bird"}
        ])
    }

    fn answer_lines(answer: Value) -> Vec<String> {
        let task = Task::new("Q", TestTaskAnswer::from(answer));
        let test = Test::new("T", vec![task]);
        correct_answer_text(&test.tasks[0], Some(&test))
    }

    #[test]
    fn test_single() {
        let lines = answer_lines(json!({
            "type": "answer/single",
            "options": [{"id": "a1", "text": "Paris"}],
            "right_answer": {"id": "a1"}
        }));
        assert_eq!(lines, vec!["Paris"]);
    }

    #[test]
    fn test_string_and_number() {
        let lines = answer_lines(json!({
            "type": "answer/string",
            "right_answer": {"string": ["photosynthesis", "Photosynthesis"]}
        }));
        assert_eq!(lines, vec!["photosynthesis", "Photosynthesis"]);

        let lines = answer_lines(json!({
            "type": "answer/number",
            "right_answer": {"number": [42, 3.5, 2.0]}
        }));
        assert_eq!(lines, vec!["42", "3.5", "2"]);
    }

    #[test]
    fn test_multiple() {
        let lines = answer_lines(json!({
            "type": "answer/multiple",
            "options": pool(),
            "right_answer": {"ids": ["a1", "a2"]}
        }));
        assert_eq!(lines, vec!["Cat", "Dog"]);
    }

    #[test]
    fn test_order() {
        let lines = answer_lines(json!({
            "type": "answer/order",
            "options": pool(),
            "right_answer": {"ids_order": ["a2", "a1"]}
        }));
        assert_eq!(lines, vec!["1. Dog", "2. Cat"]);

        let lines = answer_lines(json!({
            "type": "answer/order/vertical",
            "options": pool(),
            "right_answer": {"ids_order": ["a3"]}
        }));
        assert_eq!(lines, vec!["1. Bird"]);
    }

    #[test]
    fn test_match() {
        let lines = answer_lines(json!({
            "type": "answer/match",
            "options": pool(),
            "right_answer": {"match": {"a1": ["a2"]}}
        }));
        assert_eq!(lines, vec!["Cat → Dog"]);

        let lines = answer_lines(json!({
            "type": "answer/match",
            "options": pool(),
            "right_answer": {"match": {"a1": ["a2", "a3"], "a2": []}}
        }));
        assert_eq!(lines, vec!["Cat ↦ Dog, Bird", "Dog → (no matches)"]);
    }

    #[test]
    fn test_gap_and_inline() {
        let gap = answer_lines(json!({
            "type": "answer/gap/match/text",
            "text_position": [{"options": [{"id": "g1", "text": "red"}, {"id": "g2", "text": "blue"}]}],
            "right_answer": {"text_position_answer": [
                {"position_id": "p1", "id": "g2"},
                {"position_id": "p2", "id": "g1"}
            ]}
        }));
        assert_eq!(gap, vec!["1. blue", "2. red"]);

        let inline = answer_lines(json!({
            "type": "answer/inline/choice/single",
            "text_position": [{"options": [{"id": "g1", "text": "red"}]}],
            "right_answer": {"text_position_answer": [{"position_id": "p1", "id": "g1"}]}
        }));
        assert_eq!(inline, vec!["red"]);
    }

    #[test]
    fn test_generic_ids_fallback() {
        let lines = answer_lines(json!({
            "type": "answer/something/new",
            "options": pool(),
            "right_answer": {"ids": ["a3", "zz"]}
        }));
        assert_eq!(lines, vec!["Bird", "zz"]);
    }

    #[test]
    fn test_answers_fallback() {
        let lines = answer_lines(json!({
            "type": "answer/free",
            "options": pool(),
            "right_answer": {"answers": [
                {"strings": ["one", "two"]},
                {"string": ["three"]},
                {"id": "a1"},
                {"other": true}
            ]}
        }));
        assert_eq!(lines, vec!["one", "two", "three", "Cat"]);
    }

    #[test]
    fn test_empty_answers_falls_through_to_dump() {
        let lines = answer_lines(json!({
            "type": "answer/free",
            "right_answer": {"answers": [{"other": true}]}
        }));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"answers\""));
    }

    #[test]
    fn test_table_keeps_row_offset() {
        let lines = answer_lines(json!({
            "type": "answer/table",
            "right_answer": {"cells": {"0": {"1": ["X"]}}}
        }));
        assert_eq!(lines, vec!["Column 2, row -1: X"]);

        let lines = answer_lines(json!({
            "type": "answer/table",
            "right_answer": {"cells": {"2": {"0": ["a", "b"], "1": []}}}
        }));
        assert_eq!(lines, vec!["Column 1, row 1: a, b"]);
    }

    #[test]
    fn test_table_without_cells_content() {
        let lines = answer_lines(json!({
            "type": "answer/table",
            "right_answer": {"cells": {"0": {"0": []}}}
        }));
        assert_eq!(lines, vec![NO_ANSWERS]);
    }

    #[test]
    fn test_groups() {
        let lines = answer_lines(json!({
            "type": "answer/groups",
            "options": [
                {"id": "g1", "text": "Mammals"},
                {"id": "a1", "text": "Cat"},
                {"id": "a2", "text": "Dog"}
            ],
            "right_answer": {"groups": [{"group_id": "g1", "options_ids": ["a1", "a2"]}]}
        }));
        assert_eq!(lines, vec!["Mammals: Cat, Dog"]);

        let lines = answer_lines(json!({
            "type": "answer/groups",
            "right_answer": {"groups": []}
        }));
        assert_eq!(lines, vec![NO_ANSWERS]);
    }

    #[test]
    fn test_unknown_type_dumps_answer() {
        let answer = json!({"type": "answer/weird"});
        let lines = answer_lines(answer.clone());
        assert_eq!(lines, vec![serde_json::to_string_pretty(&answer).unwrap()]);
    }

    #[test]
    fn test_unknown_type_dumps_right_answer() {
        let lines = answer_lines(json!({
            "type": "answer/weird",
            "right_answer": {"foo": 1}
        }));
        assert_eq!(lines, vec!["{\n  \"foo\": 1\n}"]);
    }

    #[test]
    fn test_dump_puts_index_keys_first() {
        let lines = answer_lines(json!({
            "type": "answer/weird",
            "right_answer": {"b": 1, "0": 2}
        }));
        assert_eq!(lines, vec!["{\n  \"0\": 2,\n  \"b\": 1\n}"]);
    }

    #[test]
    fn test_position_without_id_uses_placeholder() {
        let lines = answer_lines(json!({
            "type": "answer/gap/match/text",
            "options": pool(),
            "right_answer": {"text_position_answer": [{"position_id": "p1"}, {"id": null}, {"id": "a2"}]}
        }));
        assert_eq!(lines, vec!["1. (no selection)", "2. (no selection)", "3. Dog"]);

        let lines = answer_lines(json!({
            "type": "answer/inline/choice/single",
            "right_answer": {"text_position_answer": [{}]}
        }));
        assert_eq!(lines, vec![NO_SELECTION]);
    }

    #[test]
    fn test_resolves_across_tasks() {
        let first = Task::new(
            "Q1",
            TestTaskAnswer::from(json!({
                "type": "answer/single",
                "right_answer": {"id": "b9"}
            })),
        );
        let second = Task::new(
            "Q2",
            TestTaskAnswer::from(json!({
                "type": "answer/inline",
                "text_position_answer": [{"options": [{"id": "b9", "label": "nine"}]}]
            })),
        );
        let test = Test::new("T", vec![first, second]);
        assert_eq!(correct_answer_text(&test.tasks[0], Some(&test)), vec!["nine"]);
        assert_eq!(correct_answer_text(&test.tasks[0], None), vec!["b9"]);
    }
}
