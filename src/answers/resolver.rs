//! Option id to display text resolution.
//!
//! An option id is only unique within the pool it came from, so lookups scan
//! a fixed sequence of pools: the answer's own options first, then every
//! task of the enclosing test (its direct pool, then its nested block pools).

use crate::models::{AnswerOption, Test};

/// Returns the display text for `id` from the first pool that has it.
///
/// Pools are scanned in order; `None` entries are skipped. An option that
/// matches but carries no text does not stop the scan. When nothing yields
/// text, the id itself is returned.
pub fn resolve_option_text<'a, I>(pools: I, id: &str) -> String
where
    I: IntoIterator<Item = Option<&'a [AnswerOption]>>,
{
    pools
        .into_iter()
        .flatten()
        .find_map(|pool| {
            pool.iter()
                .find(|option| option.id == id)
                .and_then(AnswerOption::display_text)
        })
        .unwrap_or(id)
        .to_string()
}

/// Resolves ids for one answer, falling back to the whole test.
#[derive(Debug, Clone, Copy)]
pub struct OptionResolver<'a> {
    local: Option<&'a [AnswerOption]>,
    test: Option<&'a Test>,
}

impl<'a> OptionResolver<'a> {
    pub fn new(local: Option<&'a [AnswerOption]>, test: Option<&'a Test>) -> Self {
        Self { local, test }
    }

    /// Every pool in lookup order.
    pub fn pools(&self) -> impl Iterator<Item = Option<&'a [AnswerOption]>> + 'a {
        let test_pools = self.test.into_iter().flat_map(|test| {
            test.tasks.iter().flat_map(|task| {
                let answer = task.answer();
                std::iter::once(answer.options()).chain(answer.block_pools().map(Some))
            })
        });

        std::iter::once(self.local).chain(test_pools)
    }

    pub fn resolve(&self, id: &str) -> String {
        resolve_option_text(self.pools(), id)
    }

    /// Resolves a JSON id value; non-scalar ids render as JSON.
    pub fn resolve_value(&self, id: &serde_json::Value) -> String {
        self.resolve(&super::json::display_text(id))
    }
}
