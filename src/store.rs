// In-memory task store

use crate::error::{TaskError, TaskResult};
use crate::models::{Priority, Tag, Task, TaskId, non_blank};
use chrono::NaiveDate;
use tracing::debug;

const FIRST_ID: TaskId = 1;

/// A single field change applied to an existing task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskUpdate {
    Title(String),
    DueDate(NaiveDate),
    Priority(Priority),
    /// `None` or blank text clears the description
    Description(Option<String>),
    Completed(bool),
}

/// Authoritative, insertion-ordered collection of tasks for one run
///
/// The store owns every task and the id counter. Ids are never reused, even
/// after the task holding them has been deleted.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: FIRST_ID,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// Create a new task and append it to the store
    ///
    /// The title is trimmed; a blank title is rejected without consuming an id.
    pub fn create(
        &mut self,
        title: &str,
        due_date: NaiveDate,
        priority: Priority,
        description: Option<String>,
    ) -> TaskResult<&Task> {
        let title = Self::validate_title(title)?;

        let id = self.next_id;
        self.next_id += 1;

        let task = Task::new(id, title, non_blank(description), due_date, priority);
        debug!(id, title = %task.title, %due_date, ?priority, "create: appended task");

        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Find a task by id
    pub fn find_by_id(&self, id: TaskId) -> TaskResult<&Task> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    /// Apply a single field change to a task in place
    pub fn update(&mut self, id: TaskId, change: TaskUpdate) -> TaskResult<&Task> {
        // Validate before locating the task so a rejected change never mutates
        let change = match change {
            TaskUpdate::Title(title) => TaskUpdate::Title(Self::validate_title(&title)?),
            TaskUpdate::Description(text) => TaskUpdate::Description(non_blank(text)),
            other => other,
        };

        let task = self.find_mut(id)?;
        debug!(id, ?change, "update: applying change");

        match change {
            TaskUpdate::Title(title) => task.title = title,
            TaskUpdate::DueDate(date) => task.due_date = date,
            TaskUpdate::Priority(priority) => task.priority = priority,
            TaskUpdate::Description(text) => task.description = text,
            TaskUpdate::Completed(done) => task.completed = done,
        }

        Ok(task)
    }

    /// Delete a task, returning the removed record
    pub fn delete(&mut self, id: TaskId) -> TaskResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;

        let removed = self.tasks.remove(index);
        debug!(id, remaining = self.tasks.len(), "delete: removed task");
        Ok(removed)
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// Add a tag to a task. Returns false if the normalized tag was already present.
    pub fn add_tag(&mut self, id: TaskId, name: &str) -> TaskResult<bool> {
        let tag = Tag::new(name)?;
        let task = self.find_mut(id)?;
        let added = task.tags.insert(tag);
        debug!(id, name, added, "add_tag");
        Ok(added)
    }

    /// Remove a tag from a task. Returns false if the task did not carry it.
    pub fn remove_tag(&mut self, id: TaskId, name: &str) -> TaskResult<bool> {
        let tag = Tag::new(name)?;
        let task = self.find_mut(id)?;
        let removed = task.tags.remove(&tag);
        debug!(id, name, removed, "remove_tag");
        Ok(removed)
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn find_mut(&mut self, id: TaskId) -> TaskResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    fn validate_title(title: &str) -> TaskResult<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::validation("Task title cannot be empty"));
        }
        Ok(title.to_string())
    }
}
