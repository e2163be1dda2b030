//! Copy-pasteable question/answer transcripts.

use serde::Serialize;

use super::normalizer::correct_answer_text;
use crate::models::Test;

pub const NO_QUESTION: &str = "No question";

/// A task rendered for display: its question and answer lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    /// 1-based position in the test.
    pub index: usize,
    pub question: String,
    pub answers: Vec<String>,
}

/// Renders every task of `test`, in test order.
pub fn task_views(test: &Test) -> Vec<TaskView> {
    test.tasks
        .iter()
        .enumerate()
        .map(|(i, task)| TaskView {
            index: i + 1,
            question: task.question_text().unwrap_or(NO_QUESTION).to_string(),
            answers: correct_answer_text(task, Some(test)),
        })
        .collect()
}

/// One block per task, separated by a blank line:
///
/// ```text
/// Question 1
/// <question text>
/// Answer
/// <answer lines>
/// ```
pub fn build_transcript(test: &Test) -> String {
    task_views(test)
        .iter()
        .map(|view| {
            format!(
                "Question {}\n{}\nAnswer\n{}",
                view.index,
                view.question,
                view.answers.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TestTaskAnswer};
    use serde_json::json;

    fn sample_test() -> Test {
        let first = Task::new(
            "Capital of France?",
            TestTaskAnswer::from(json!({
                "type": "answer/single",
                "options": [{"id": "a1", "text": "Paris"}, {"id": "a2", "text": "Lyon"}],
                "right_answer": {"id": "a1"}
            })),
        );
        let second = Task::new(
            "Order the numbers",
            TestTaskAnswer::from(json!({
                "type": "answer/order",
                "options": [{"id": "n1", "text": "one"}, {"id": "n2", "text": "two"}],
                "right_answer": {"ids_order": ["n1", "n2"]}
            })),
        );
        Test::new("Mixed", vec![first, second])
    }

    #[test]
    fn test_transcript_blocks() {
        let transcript = build_transcript(&sample_test());
        assert_eq!(
            transcript,
            "Question 1\nCapital of France?\nAnswer\nParis\n\n\
             Question 2\nOrder the numbers\nAnswer\n1. one\n2. two"
        );

        let blocks: Vec<&str> = transcript.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Question 1"));
        assert!(blocks[1].starts_with("Question 2"));
    }

    #[test]
    fn test_missing_question_uses_placeholder() {
        let mut test = sample_test();
        test.tasks[0].test_task.question_elements.clear();
        let views = task_views(&test);
        assert_eq!(views[0].question, NO_QUESTION);
        assert_eq!(views[1].index, 2);
    }

    #[test]
    fn test_empty_test() {
        assert_eq!(build_transcript(&Test::empty()), "");
    }
}
