mod catalogue;
mod lenient;
mod option;

pub use catalogue::{SearchItem, Tag};
pub use option::AnswerOption;
pub use test::{QuestionElement, Task, Test, TestTask, TestTaskAnswer};
