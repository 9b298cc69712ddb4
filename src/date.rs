// Due date parsing and formatting

use crate::error::{TaskError, TaskResult};
use chrono::NaiveDate;

/// Input and display pattern for due dates (dd.mm.yyyy)
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Hint shown to users next to date prompts
pub const DATE_HINT: &str = "dd.mm.yyyy";

pub fn parse_date(input: &str) -> TaskResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| TaskError::validation(format!("Invalid date {:?}, expected {}", input, DATE_HINT)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Reject dates before `today`. Today itself is accepted.
pub fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> TaskResult<NaiveDate> {
    if date < today {
        return Err(TaskError::validation("Due date cannot be in the past"));
    }
    Ok(date)
}
