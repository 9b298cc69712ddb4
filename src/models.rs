// Data models for tasktrack

use crate::error::{TaskError, TaskResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Task identifier, assigned by the store starting at 1
pub type TaskId = u32;

/// Parse raw user input into a task id
pub fn parse_task_id(input: &str) -> TaskResult<TaskId> {
    input
        .trim()
        .parse::<TaskId>()
        .map_err(|_| TaskError::validation(format!("Task id must be a number: {:?}", input.trim())))
}

/// Task urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Human-readable label shown in listings
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Menu number used when picking a priority interactively
    pub fn menu_number(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn from_menu_number(choice: &str) -> Option<Priority> {
        match choice.trim() {
            "1" => Some(Priority::Low),
            "2" => Some(Priority::Medium),
            "3" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> TaskResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(TaskError::validation(format!("Unknown priority: {}", other))),
        }
    }
}

/// Normalized tag label: trimmed and lower-cased, never empty
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Tag(String);

impl TryFrom<String> for Tag {
    type Error = TaskError;

    fn try_from(raw: String) -> TaskResult<Self> {
        Tag::new(&raw)
    }
}

impl Tag {
    pub fn new(raw: &str) -> TaskResult<Self> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            return Err(TaskError::validation("Tag cannot be empty"));
        }
        Ok(Tag(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single to-do item
///
/// Fields are read-only outside the crate; all mutation goes through
/// [`crate::TaskStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub(crate) id: TaskId,
    pub(crate) title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) due_date: NaiveDate,
    pub(crate) priority: Priority,
    pub(crate) completed: bool,
    pub(crate) tags: BTreeSet<Tag>,
}

impl Task {
    pub(crate) fn new(
        id: TaskId,
        title: String,
        description: Option<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_date,
            priority,
            completed: false,
            tags: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

/// Trim text input, mapping blank strings to `None`
pub(crate) fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
