// Display representation of tasks

use crate::config::OutputFormat;
use crate::date::format_date;
use crate::jsonl;
use crate::models::{Priority, Task};
use colored::Colorize;
use eyre::Result;
use std::io::Write;

/// Writes task listings in the configured output format
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
    color: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn plain() -> Self {
        Self::new(OutputFormat::Text, false)
    }

    pub fn write_tasks<W: Write>(&self, out: &mut W, tasks: &[&Task]) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                for task in tasks {
                    writeln!(out, "{}", self.task_line(task))?;
                }
            }
            OutputFormat::Json => {
                jsonl::write_jsonl(out, tasks.iter().copied())?;
            }
        }
        Ok(())
    }

    /// One-line summary, e.g.
    /// `ID: 1 | Report | Priority: High | Due: 01.03.2025 | Tags: #work | Pending`
    pub fn task_line(&self, task: &Task) -> String {
        let mut parts = vec![format!("ID: {}", task.id()), task.title().to_string()];

        if let Some(description) = task.description() {
            parts.push(description.to_string());
        }

        parts.push(format!("Priority: {}", self.priority(task.priority())));
        parts.push(format!("Due: {}", format_date(task.due_date())));

        let tags = if task.tags().is_empty() {
            "-".to_string()
        } else {
            task.tags().iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
        };
        parts.push(format!("Tags: {}", tags));
        parts.push(self.status(task.is_completed()));

        parts.join(" | ")
    }

    fn priority(&self, priority: Priority) -> String {
        if !self.color {
            return priority.label().to_string();
        }
        match priority {
            Priority::Low => priority.label().dimmed().to_string(),
            Priority::Medium => priority.label().yellow().to_string(),
            Priority::High => priority.label().red().bold().to_string(),
        }
    }

    fn status(&self, completed: bool) -> String {
        let label = if completed { "✓ Done" } else { "⏳ Pending" };
        match (self.color, completed) {
            (false, _) => label.to_string(),
            (true, true) => label.green().to_string(),
            (true, false) => label.cyan().to_string(),
        }
    }
}
