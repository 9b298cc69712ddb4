// Interactive menu over a task store
//
// Generic over input and output so sessions can be scripted in tests.
// All task rules live in the store; this module only prompts, parses and
// reports.

use crate::date::{DATE_HINT, ensure_not_past, parse_date};
use crate::error::{TaskError, TaskResult};
use crate::filter::TagFilter;
use crate::models::{Priority, Task, TaskId, parse_task_id};
use crate::render::Renderer;
use crate::store::{TaskStore, TaskUpdate};
use chrono::NaiveDate;
use eyre::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info};

const EMPTY_LIST: &str = "Task list is empty";

pub struct Repl<R, W> {
    store: TaskStore,
    input: R,
    out: W,
    renderer: Renderer,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// `today` is the earliest due date accepted from the user
    pub fn new(input: R, out: W, renderer: Renderer, today: NaiveDate) -> Self {
        Self {
            store: TaskStore::new(),
            input,
            out,
            renderer,
            today,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run the main menu until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        info!(today = %self.today, "Starting interactive session");
        writeln!(self.out, "=== To-Do List Manager ===")?;
        self.print_menu()?;

        loop {
            let Some(choice) = self.prompt("\nChoose an action: ")? else {
                debug!("Input closed, leaving main menu");
                break;
            };

            match choice.as_str() {
                "1" => self.create_task()?,
                "2" => self.list_tasks()?,
                "3" => self.edit_task()?,
                "4" => self.delete_task()?,
                "5" => self.sort_by_date()?,
                "6" => self.search_by_tags()?,
                "0" => {
                    writeln!(self.out, "Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.out, "Invalid choice, try again.")?;
                    self.print_menu()?;
                }
            }
        }

        info!(tasks = self.store.len(), "Session finished");
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n=== Main menu ===")?;
        writeln!(self.out, "1. Create a task")?;
        writeln!(self.out, "2. Show all tasks")?;
        writeln!(self.out, "3. Edit a task")?;
        writeln!(self.out, "4. Delete a task")?;
        writeln!(self.out, "5. Sort tasks by due date")?;
        writeln!(self.out, "6. Search tasks by tags")?;
        writeln!(self.out, "0. Exit")?;
        Ok(())
    }

    // ========================================================================
    // Menu actions
    // ========================================================================

    fn create_task(&mut self) -> Result<()> {
        writeln!(self.out, "\n=== New task ===")?;

        let Some(title) = self.prompt("Title: ")? else {
            return Ok(());
        };
        if title.is_empty() {
            return self.fail(&TaskError::validation("Task title cannot be empty"));
        }

        let Some(description) = self.prompt("Description (optional): ")? else {
            return Ok(());
        };
        let Some(due_date) = self.read_date(&format!("Due date ({}): ", DATE_HINT))? else {
            return Ok(());
        };
        let Some(priority) = self.read_priority()? else {
            return Ok(());
        };

        let created = self
            .store
            .create(&title, due_date, priority, Some(description))
            .map(Task::id);
        let id = match created {
            Ok(id) => id,
            Err(e) => return self.fail(&e),
        };

        writeln!(self.out, "Adding tags (empty line to finish):")?;
        while let Some(tag) = self.prompt("Tag: ")? {
            if tag.is_empty() {
                break;
            }
            let result = self.store.add_tag(id, &tag);
            self.report_tag_added(result, &tag)?;
        }

        writeln!(self.out, "Task created with ID {}", id)?;
        Ok(())
    }

    fn list_tasks(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.out, "{}", EMPTY_LIST)?;
            return Ok(());
        }

        writeln!(self.out, "\n=== Task list ===")?;
        self.renderer.write_tasks(&mut self.out, &self.store.list_all())
    }

    fn edit_task(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.out, "{}", EMPTY_LIST)?;
            return Ok(());
        }

        writeln!(self.out, "\n=== Edit task ===")?;
        self.list_tasks()?;

        let Some(id) = self.read_existing_id("Task ID: ")? else {
            return Ok(());
        };

        loop {
            writeln!(self.out, "\nEditing task {}:", id)?;
            writeln!(self.out, "1. Change title")?;
            writeln!(self.out, "2. Change due date")?;
            writeln!(self.out, "3. Change priority")?;
            writeln!(self.out, "4. Change description")?;
            writeln!(self.out, "5. Toggle completed")?;
            writeln!(self.out, "6. Add tag")?;
            writeln!(self.out, "7. Remove tag")?;
            writeln!(self.out, "0. Finish editing")?;

            let Some(choice) = self.prompt("Choose an action: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => {
                    if let Some(title) = self.prompt("New title: ")? {
                        self.apply(id, TaskUpdate::Title(title), "Title updated")?;
                    }
                }
                "2" => {
                    let prompt = format!("New due date ({}): ", DATE_HINT);
                    if let Some(date) = self.read_date(&prompt)? {
                        self.apply(id, TaskUpdate::DueDate(date), "Due date updated")?;
                    }
                }
                "3" => {
                    if let Some(priority) = self.read_priority()? {
                        self.apply(id, TaskUpdate::Priority(priority), "Priority updated")?;
                    }
                }
                "4" => {
                    if let Some(text) = self.prompt("New description (empty to clear): ")? {
                        self.apply(id, TaskUpdate::Description(Some(text)), "Description updated")?;
                    }
                }
                "5" => {
                    let completed = self.store.find_by_id(id).map(Task::is_completed);
                    match completed {
                        Ok(done) => {
                            let msg = if done { "Marked as pending" } else { "Marked as done" };
                            self.apply(id, TaskUpdate::Completed(!done), msg)?;
                        }
                        Err(e) => self.fail(&e)?,
                    }
                }
                "6" => {
                    if let Some(tag) = self.prompt("Tag to add: ")? {
                        let result = self.store.add_tag(id, &tag);
                        self.report_tag_added(result, &tag)?;
                    }
                }
                "7" => {
                    if let Some(tag) = self.prompt("Tag to remove: ")? {
                        match self.store.remove_tag(id, &tag) {
                            Ok(true) => writeln!(self.out, "Tag removed")?,
                            Ok(false) => writeln!(self.out, "Task has no tag #{}", tag.to_lowercase())?,
                            Err(e) => self.fail(&e)?,
                        }
                    }
                }
                "0" => {
                    writeln!(self.out, "Editing finished")?;
                    break;
                }
                _ => writeln!(self.out, "Invalid choice")?,
            }
        }

        Ok(())
    }

    fn delete_task(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.out, "{}", EMPTY_LIST)?;
            return Ok(());
        }

        writeln!(self.out, "\n=== Delete task ===")?;
        self.list_tasks()?;

        let Some(input) = self.prompt("ID of task to delete: ")? else {
            return Ok(());
        };

        match parse_task_id(&input).and_then(|id| self.store.delete(id)) {
            Ok(task) => {
                writeln!(self.out, "Task {} deleted", task.id())?;
                Ok(())
            }
            Err(e) => self.fail(&e),
        }
    }

    fn sort_by_date(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.out, "{}", EMPTY_LIST)?;
            return Ok(());
        }

        writeln!(self.out, "\n=== Tasks by due date ===")?;
        let sorted = self.store.sort_by_due_date();
        self.renderer.write_tasks(&mut self.out, &sorted)
    }

    fn search_by_tags(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.out, "{}", EMPTY_LIST)?;
            return Ok(());
        }

        writeln!(self.out, "\n=== Search by tags ===")?;
        let Some(input) = self.prompt("Tags to search (comma-separated): ")? else {
            return Ok(());
        };

        let filter = match TagFilter::parse(&input) {
            Ok(filter) => filter,
            Err(e) => return self.fail(&e),
        };

        let found = self.store.search_by_tags(&filter);
        debug!(tags = ?filter.tags(), found = found.len(), "search_by_tags");
        if found.is_empty() {
            writeln!(self.out, "No tasks found with the given tags")?;
            return Ok(());
        }

        writeln!(self.out, "\nFound tasks:")?;
        self.renderer.write_tasks(&mut self.out, &found)
    }

    // ========================================================================
    // Input helpers
    // ========================================================================

    /// Print `text` and read one trimmed line. `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn confirm_retry(&mut self) -> Result<bool> {
        let answer = self.prompt("Try again? (y/n): ")?;
        Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("y")))
    }

    /// Read a due date, re-prompting on past dates and offering a retry on
    /// malformed input
    fn read_date(&mut self, prompt: &str) -> Result<Option<NaiveDate>> {
        loop {
            let Some(input) = self.prompt(prompt)? else {
                return Ok(None);
            };

            match parse_date(&input) {
                Ok(date) => match ensure_not_past(date, self.today) {
                    Ok(date) => return Ok(Some(date)),
                    Err(e) => self.fail(&e)?,
                },
                Err(e) => {
                    self.fail(&e)?;
                    if !self.confirm_retry()? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn read_priority(&mut self) -> Result<Option<Priority>> {
        loop {
            writeln!(self.out, "\nChoose a priority:")?;
            for priority in Priority::ALL {
                writeln!(self.out, "{} - {}", priority.menu_number(), priority.label())?;
            }

            let Some(choice) = self.prompt("Your choice: ")? else {
                return Ok(None);
            };

            if let Some(priority) = Priority::from_menu_number(&choice) {
                return Ok(Some(priority));
            }

            writeln!(self.out, "Invalid choice.")?;
            if !self.confirm_retry()? {
                return Ok(None);
            }
        }
    }

    /// Read an id and make sure it names a task in the store
    fn read_existing_id(&mut self, prompt: &str) -> Result<Option<TaskId>> {
        let Some(input) = self.prompt(prompt)? else {
            return Ok(None);
        };

        let found = parse_task_id(&input).and_then(|id| self.store.find_by_id(id).map(Task::id));
        match found {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                self.fail(&e)?;
                Ok(None)
            }
        }
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    fn apply(&mut self, id: TaskId, change: TaskUpdate, success: &str) -> Result<()> {
        let result = self.store.update(id, change).map(|_| ());
        match result {
            Ok(()) => {
                writeln!(self.out, "{}", success)?;
                Ok(())
            }
            Err(e) => self.fail(&e),
        }
    }

    fn report_tag_added(&mut self, result: TaskResult<bool>, tag: &str) -> Result<()> {
        match result {
            Ok(true) => writeln!(self.out, "Tag added")?,
            Ok(false) => writeln!(self.out, "Task already has tag #{}", tag.trim().to_lowercase())?,
            Err(e) => self.fail(&e)?,
        }
        Ok(())
    }

    /// Report a rejected operation; the session carries on
    fn fail(&mut self, err: &TaskError) -> Result<()> {
        debug!(error = %err, "Operation rejected");
        writeln!(self.out, "Error: {}", err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn run_script(script: &str) -> Repl<Cursor<Vec<u8>>, Vec<u8>> {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut repl = Repl::new(input, Vec::new(), Renderer::plain(), today());
        repl.run().unwrap();
        repl
    }

    fn output(repl: &Repl<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(repl.output().clone()).unwrap()
    }

    #[test]
    fn test_create_task_with_tags() {
        let repl = run_script("1\nReport\nQ1 numbers\n01.03.2025\n3\nwork\nUrgent\nwork \n\n2\n0\n");

        let store = repl.store();
        assert_eq!(store.len(), 1);
        let task = store.find_by_id(1).unwrap();
        assert_eq!(task.title(), "Report");
        assert_eq!(task.description(), Some("Q1 numbers"));
        assert_eq!(task.priority(), Priority::High);
        assert_eq!(task.tags().len(), 2);

        let out = output(&repl);
        assert!(out.contains("Task created with ID 1"));
        assert!(out.contains("Task already has tag #work"));
        assert!(out.contains("ID: 1 | Report | Q1 numbers | Priority: High | Due: 01.03.2025 | Tags: #urgent #work"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let repl = run_script("1\n   \n0\n");
        assert!(repl.store().is_empty());
        assert!(output(&repl).contains("Error: Task title cannot be empty"));
    }

    #[test]
    fn test_past_date_reprompts() {
        let repl = run_script("1\nPlan\n\n31.12.2024\n05.01.2025\n1\n\n0\n");

        let task = repl.store().find_by_id(1).unwrap();
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(task.description(), None);
        assert!(output(&repl).contains("Due date cannot be in the past"));
    }

    #[test]
    fn test_malformed_date_without_retry_aborts() {
        let repl = run_script("1\nPlan\n\nnext week\nn\n2\n0\n");
        assert!(repl.store().is_empty());

        let out = output(&repl);
        assert!(out.contains("Invalid date"));
        assert!(out.contains(EMPTY_LIST));
    }

    #[test]
    fn test_invalid_priority_retry() {
        let repl = run_script("1\nPlan\n\n02.01.2025\n9\ny\n2\n\n0\n");
        assert_eq!(repl.store().find_by_id(1).unwrap().priority(), Priority::Medium);
        assert!(output(&repl).contains("Invalid choice."));
    }

    #[test]
    fn test_edit_task() {
        let script = concat!(
            "1\nDraft\n\n01.02.2025\n1\n\n",
            "3\n1\n",
            "1\nFinal\n",
            "1\n \n",
            "2\n01.03.2025\n",
            "3\n3\n",
            "4\nSome notes\n",
            "5\n",
            "6\nHome\n",
            "6\nGarden\n",
            "7\ngarden\n",
            "7\nmissing\n",
            "0\n0\n",
        );
        let repl = run_script(script);

        let task = repl.store().find_by_id(1).unwrap();
        assert_eq!(task.title(), "Final");
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(task.priority(), Priority::High);
        assert_eq!(task.description(), Some("Some notes"));
        assert!(task.is_completed());
        let tags: Vec<&str> = task.tags().iter().map(|t| t.name()).collect();
        assert_eq!(tags, vec!["home"]);

        let out = output(&repl);
        assert!(out.contains("Title updated"));
        assert!(out.contains("Error: Task title cannot be empty"));
        assert!(out.contains("Marked as done"));
        assert!(out.contains("Tag removed"));
        assert!(out.contains("Task has no tag #missing"));
        assert!(out.contains("Editing finished"));
    }

    #[test]
    fn test_edit_unknown_id() {
        let repl = run_script("1\nA\n\n01.02.2025\n1\n\n3\n42\n3\nabc\n0\n");
        let out = output(&repl);
        assert!(out.contains("Error: Task not found: 42"));
        assert!(out.contains("Error: Task id must be a number"));
    }

    #[test]
    fn test_delete_task() {
        let repl = run_script("1\nA\n\n01.02.2025\n1\n\n1\nB\n\n01.02.2025\n1\n\n4\n1\n4\n9999\n0\n");

        let store = repl.store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].title(), "B");

        let out = output(&repl);
        assert!(out.contains("Task 1 deleted"));
        assert!(out.contains("Error: Task not found: 9999"));
    }

    #[test]
    fn test_sort_and_search() {
        let script = concat!(
            "1\nMarch\n\n01.03.2025\n1\nwork\n\n",
            "1\nJanuary\n\n10.01.2025\n1\nhome\n\n",
            "1\nFebruary\n\n15.02.2025\n1\nWORK\n\n",
            "5\n",
            "6\nwork\n",
            "6\n , \n",
            "6\ngarden\n",
            "0\n",
        );
        let repl = run_script(script);
        let out = output(&repl);

        let sorted = out.split("=== Tasks by due date ===").nth(1).unwrap();
        let jan = sorted.find("January").unwrap();
        let feb = sorted.find("February").unwrap();
        let mar = sorted.find("March").unwrap();
        assert!(jan < feb && feb < mar);

        let found = out.split("Found tasks:").nth(1).unwrap();
        let found_section = found.split("===").next().unwrap();
        assert!(found_section.contains("ID: 1 | March"));
        assert!(found_section.contains("ID: 3 | February"));
        assert!(!found_section.contains("January"));

        assert!(out.contains("Error: No tags given to search for"));
        assert!(out.contains("No tasks found with the given tags"));
    }

    #[test]
    fn test_empty_store_messages() {
        let repl = run_script("2\n3\n4\n5\n6\n0\n");
        assert_eq!(output(&repl).matches(EMPTY_LIST).count(), 5);
    }

    #[test]
    fn test_invalid_menu_choice_and_eof() {
        // No explicit exit: end of input ends the session
        let repl = run_script("7\n");
        let out = output(&repl);
        assert!(out.contains("Invalid choice, try again."));
        assert_eq!(out.matches("=== Main menu ===").count(), 2);
        assert!(!out.contains("Goodbye!"));
    }

    #[test]
    fn test_eof_mid_create() {
        let repl = run_script("1\nUnfinished\n");
        assert!(repl.store().is_empty());
    }
}
