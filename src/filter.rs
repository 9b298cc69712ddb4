// Tag filtering for search queries

use crate::error::{TaskError, TaskResult};
use crate::models::{Tag, Task};
use std::collections::BTreeSet;

/// Set of normalized tags to match tasks against
///
/// A task matches when it carries at least one of the tags (logical OR).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    tags: BTreeSet<Tag>,
}

impl TagFilter {
    /// Build a filter from already-normalized tags. May be empty.
    pub fn new(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    /// Parse comma-separated user input such as `"Work, urgent,,home"`
    ///
    /// Blank entries are skipped and duplicates collapse after normalization.
    /// Input yielding no tags at all is rejected.
    pub fn parse(input: &str) -> TaskResult<Self> {
        let tags: BTreeSet<Tag> = input
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Tag::new)
            .collect::<TaskResult<_>>()?;

        if tags.is_empty() {
            return Err(TaskError::validation("No tags given to search for"));
        }

        Ok(Self { tags })
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.tags.iter().any(|tag| task.has_tag(tag))
    }
}
