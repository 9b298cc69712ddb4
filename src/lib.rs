// tasktrack - Interactive in-memory task tracker

pub mod config;
pub mod date;
pub mod error;
pub mod filter;
pub mod jsonl;
pub mod models;
pub mod query;
pub mod render;
pub mod repl;
pub mod store;

// Re-export main types for convenience
pub use config::{Config, OutputFormat};
pub use error::{TaskError, TaskResult};
pub use filter::TagFilter;
pub use models::{Priority, Tag, Task, TaskId, parse_task_id};
pub use render::Renderer;
pub use repl::Repl;
pub use store::{TaskStore, TaskUpdate};
