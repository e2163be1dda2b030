//! Correct-answer extraction.
//!
//! [`resolver`] maps option ids to display text, [`normalizer`] renders a
//! task's answer through its [`shape`], and [`transcript`] stitches every
//! task of a test into one block of text.

pub mod json;
pub mod normalizer;
pub mod resolver;
pub mod shape;
pub mod transcript;

pub use normalizer::correct_answer_text;
pub use resolver::{resolve_option_text, OptionResolver};
pub use shape::AnswerShape;
pub use transcript::{build_transcript, task_views, TaskView};
