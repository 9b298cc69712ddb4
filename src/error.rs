// Error types for task store and query operations

use crate::models::TaskId;
use thiserror::Error;

/// Recoverable failures reported by the core.
///
/// Neither variant leaves partial state behind: the operation that produced
/// it was rejected before touching the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),

    #[error("Task not found: {0}")]
    NotFound(TaskId),
}

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TaskError::Validation(msg.into())
    }
}

pub type TaskResult<T> = std::result::Result<T, TaskError>;
