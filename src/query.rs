// Read-only views over the task store

use crate::filter::TagFilter;
use crate::models::Task;
use crate::store::TaskStore;

impl TaskStore {
    /// All tasks in insertion order. Empty store gives an empty list.
    pub fn list_all(&self) -> Vec<&Task> {
        self.tasks().iter().collect()
    }

    /// Snapshot of all tasks ordered by ascending due date
    ///
    /// The sort is stable, so tasks sharing a due date keep insertion order.
    pub fn sort_by_due_date(&self) -> Vec<&Task> {
        let mut sorted = self.list_all();
        sorted.sort_by_key(|task| task.due_date());
        sorted
    }

    /// Tasks carrying any of the filter's tags, in store order
    pub fn search_by_tags(&self, filter: &TagFilter) -> Vec<&Task> {
        self.tasks().iter().filter(|task| filter.matches(task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Tag};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(tasks: &[&Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id()).collect()
    }

    fn tagged_store() -> TaskStore {
        let mut store = TaskStore::new();
        for (title, tags) in [("Report", vec!["work", "urgent"]), ("Dishes", vec!["home"]), ("Email", vec!["Work"])] {
            let id = store.create(title, date(2025, 1, 1), Priority::Medium, None).unwrap().id();
            for tag in tags {
                store.add_tag(id, tag).unwrap();
            }
        }
        store
    }

    #[test]
    fn test_empty_store_queries() {
        let store = TaskStore::new();
        assert!(store.list_all().is_empty());
        assert!(store.sort_by_due_date().is_empty());
        assert!(store.search_by_tags(&TagFilter::parse("work").unwrap()).is_empty());
    }

    #[test]
    fn test_list_all_insertion_order() {
        let mut store = TaskStore::new();
        store.create("B", date(2025, 2, 1), Priority::Low, None).unwrap();
        store.create("A", date(2025, 1, 1), Priority::Low, None).unwrap();

        let titles: Vec<&str> = store.list_all().iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_sort_by_due_date() {
        let mut store = TaskStore::new();
        store.create("March", date(2025, 3, 1), Priority::Low, None).unwrap();
        store.create("January", date(2025, 1, 10), Priority::Low, None).unwrap();
        store.create("February", date(2025, 2, 15), Priority::Low, None).unwrap();

        let dates: Vec<NaiveDate> = store.sort_by_due_date().iter().map(|t| t.due_date()).collect();
        assert_eq!(dates, vec![date(2025, 1, 10), date(2025, 2, 15), date(2025, 3, 1)]);

        // Store order is untouched
        assert_eq!(ids(&store.list_all()), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let mut store = TaskStore::new();
        store.create("Late", date(2025, 6, 1), Priority::Low, None).unwrap();
        store.create("Same first", date(2025, 1, 1), Priority::High, None).unwrap();
        store.create("Same second", date(2025, 1, 1), Priority::Low, None).unwrap();

        assert_eq!(ids(&store.sort_by_due_date()), vec![2, 3, 1]);
    }

    #[test]
    fn test_search_by_tags_any_match() {
        let store = tagged_store();

        let filter = TagFilter::new([Tag::new("work").unwrap()]);
        assert_eq!(ids(&store.search_by_tags(&filter)), vec![1, 3]);
    }

    #[test]
    fn test_search_by_tags_is_or() {
        let store = tagged_store();

        let filter = TagFilter::parse("HOME, urgent").unwrap();
        assert_eq!(ids(&store.search_by_tags(&filter)), vec![1, 2]);
    }

    #[test]
    fn test_search_with_empty_filter() {
        let store = tagged_store();
        assert!(store.search_by_tags(&TagFilter::default()).is_empty());
    }

    #[test]
    fn test_search_no_match() {
        let store = tagged_store();
        let filter = TagFilter::parse("garden").unwrap();
        assert!(store.search_by_tags(&filter).is_empty());
    }
}
