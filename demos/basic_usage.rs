//! Basic usage of the task store and query layer
//!
//! Creates a few tasks, edits and tags them, then lists, sorts and searches.
//!
//! Run with: cargo run --example basic_usage

use chrono::NaiveDate;
use eyre::{Result, eyre};
use tasktrack::{Priority, Renderer, TagFilter, TaskStore, TaskUpdate};

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| eyre!("invalid date {}-{}-{}", y, m, d))
}

fn main() -> Result<()> {
    let mut store = TaskStore::new();
    let renderer = Renderer::plain();

    println!("tasktrack Basic Usage Example");
    println!("=============================\n");

    // CREATE
    println!("1. CREATE - Adding tasks...");
    let report = store
        .create("Quarterly report", date(2025, 3, 1)?, Priority::High, None)?
        .id();
    let dishes = store
        .create("Dishes", date(2025, 1, 10)?, Priority::Low, Some("After dinner".to_string()))?
        .id();
    let email = store
        .create("Reply to email", date(2025, 2, 15)?, Priority::Medium, None)?
        .id();
    println!("   Created tasks {}, {}, {}\n", report, dishes, email);

    // TAGS
    println!("2. TAG - Tagging tasks...");
    store.add_tag(report, "Work")?;
    store.add_tag(report, "urgent")?;
    store.add_tag(dishes, "home")?;
    store.add_tag(email, " work ")?;
    println!();

    // UPDATE
    println!("3. UPDATE - Completing the dishes...");
    store.update(dishes, TaskUpdate::Completed(true))?;
    println!();

    // LIST / SORT / SEARCH
    println!("4. LIST - All tasks in creation order:");
    for task in store.list_all() {
        println!("   {}", renderer.task_line(task));
    }
    println!();

    println!("5. SORT - By due date:");
    for task in store.sort_by_due_date() {
        println!("   {}", renderer.task_line(task));
    }
    println!();

    println!("6. SEARCH - Tagged #work:");
    let filter = TagFilter::parse("work")?;
    for task in store.search_by_tags(&filter) {
        println!("   {}", renderer.task_line(task));
    }
    println!();

    // DELETE
    println!("7. DELETE - Removing the report...");
    store.delete(report)?;
    match store.find_by_id(report) {
        Ok(_) => println!("   Still there?"),
        Err(e) => println!("   {}", e),
    }

    println!("\nExample complete!");
    Ok(())
}
