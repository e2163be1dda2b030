//! Structural variants of a task's correct answer.
//!
//! The upstream `right_answer` object has no common schema: its shape is
//! implied by the sibling `type` string. Each variant below pairs a type
//! (or type prefix) with the field it requires. A type whose field is missing
//! or malformed matches no variant and falls through to later ones.

use serde_json::{Map, Value};

use super::json::{array_field, is_truthy, truthy_field};
use crate::models::TestTaskAnswer;

/// One recognised answer shape, borrowing from the answer it was read from.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerShape<'a> {
    /// `answer/single`: `{id}`.
    Single(&'a Value),
    /// `answer/string`: `{string: [..]}`.
    Strings(&'a [Value]),
    /// `answer/number`: `{number: [..]}`.
    Numbers(&'a [Value]),
    /// `answer/multiple`: `{ids: [..]}`.
    Multiple(&'a [Value]),
    /// `answer/order`, `answer/order/vertical`: `{ids_order: [..]}`.
    Order(&'a [Value]),
    /// `answer/match`: `{match: {source: [targets]}}`.
    Match(&'a Map<String, Value>),
    /// `answer/gap*`: `{text_position_answer: [{id}]}`.
    Gap(&'a [Value]),
    /// `answer/inline*`: `{text_position_answer: [{id}]}`.
    Inline(&'a [Value]),
    /// Any type carrying `{ids: [..]}`.
    Ids(&'a [Value]),
    /// Any type carrying `{answers: [{strings|string|id}]}`.
    Answers(&'a [Value]),
    /// `answer/table`: `{cells: {row: {col: [..]}}}`.
    Table(&'a Value),
    /// `answer/groups`: `{groups: [{group_id, options_ids}]}`.
    Groups(&'a Value),
    /// Nothing recognisable: render the raw JSON.
    Dump(&'a Value),
}

impl<'a> AnswerShape<'a> {
    /// Every shape the answer structurally matches, in precedence order.
    ///
    /// The list always ends with [`AnswerShape::Dump`], so it is never empty.
    pub fn candidates(answer: &'a TestTaskAnswer) -> Vec<AnswerShape<'a>> {
        let kind = answer.kind();
        let right = answer.right_answer();
        let mut shapes = Vec::new();

        match kind {
            "answer/single" => {
                if let Some(id) = right.and_then(|r| truthy_field(r, "id")) {
                    shapes.push(Self::Single(id));
                }
            }
            "answer/string" => {
                if let Some(strings) = array_field(right, "string") {
                    shapes.push(Self::Strings(strings));
                }
            }
            "answer/number" => {
                if let Some(numbers) = array_field(right, "number") {
                    shapes.push(Self::Numbers(numbers));
                }
            }
            "answer/multiple" => {
                if let Some(ids) = array_field(right, "ids") {
                    shapes.push(Self::Multiple(ids));
                }
            }
            "answer/order" | "answer/order/vertical" => {
                if let Some(ids) = array_field(right, "ids_order") {
                    shapes.push(Self::Order(ids));
                }
            }
            "answer/match" => {
                if let Some(pairs) = right
                    .and_then(|r| truthy_field(r, "match"))
                    .and_then(Value::as_object)
                {
                    shapes.push(Self::Match(pairs));
                }
            }
            _ => {}
        }

        if let Some(positions) = array_field(right, "text_position_answer") {
            if kind.starts_with("answer/gap") {
                shapes.push(Self::Gap(positions));
            } else if kind.starts_with("answer/inline") {
                shapes.push(Self::Inline(positions));
            }
        }

        if let Some(ids) = array_field(right, "ids") {
            shapes.push(Self::Ids(ids));
        }

        if let Some(answers) = array_field(right, "answers") {
            shapes.push(Self::Answers(answers));
        }

        if let Some(r) = right {
            match kind {
                "answer/table" => {
                    if let Some(cells) = truthy_field(r, "cells") {
                        shapes.push(Self::Table(cells));
                    }
                }
                "answer/groups" => {
                    if let Some(groups) = truthy_field(r, "groups") {
                        shapes.push(Self::Groups(groups));
                    }
                }
                _ => {}
            }
        }

        let dump = right.filter(|r| is_truthy(r)).unwrap_or(answer.raw());
        shapes.push(Self::Dump(dump));
        shapes
    }
}
