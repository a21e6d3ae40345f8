use heapless::{String, Vec};
use serde::Deserialize;

use crate::event::push_str_lossy;

pub const MAX_TASKS: usize = 50;
pub const MAX_TASK_TITLE: usize = 64;

/// Wire form of one task record. Unknown fields are skipped.
#[derive(Deserialize)]
struct TaskRecord<'a> {
    title: &'a str,
    #[serde(default)]
    status: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String<MAX_TASK_TITLE>,
    pub completed: bool,
}

/// Bounded to-do list, rebuilt wholesale from the task file on each load.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task, MAX_TASKS>,
}

impl TaskList {
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Rebuild from the task file: a JSON array of `{title, status}`
    /// records, `"completed"` marking a finished task. Anything that does
    /// not deserialize, including an array past the capacity bound, yields
    /// an empty list. Records with an empty title are dropped.
    pub fn reload_from_json(&mut self, data: &[u8]) {
        self.tasks.clear();

        let records: Vec<TaskRecord, MAX_TASKS> =
            match serde_json_core::de::from_slice(data) {
                Ok((records, _)) => records,
                Err(_) => return,
            };

        for record in &records {
            if record.title.is_empty() {
                continue;
            }
            let mut title = String::new();
            push_str_lossy(&mut title, record.title);
            let task = Task {
                title,
                completed: record.status == Some("completed"),
            };
            if self.tasks.push(task).is_err() {
                break;
            }
        }
    }

    pub fn from_json(data: &[u8]) -> Self {
        let mut list = Self::new();
        list.reload_from_json(data);
        list
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tasks() {
        let json = br#"[
            {"title": "Water plants", "status": "pending"},
            {"title": "Pay rent", "status": "completed"},
            {"title": "Call home"}
        ]"#;
        let list = TaskList::from_json(json);
        assert_eq!(list.len(), 3);
        assert_eq!(list.tasks()[0].title.as_str(), "Water plants");
        assert!(!list.tasks()[0].completed);
        assert!(list.tasks()[1].completed);
        assert!(!list.tasks()[2].completed);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = br#"[{"title": "One", "status": "pending", "uid": "x-1"}]"#;
        let list = TaskList::from_json(json);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_empty_title_dropped() {
        let json = br#"[{"title": ""}, {"title": "Kept"}]"#;
        let list = TaskList::from_json(json);
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].title.as_str(), "Kept");
    }

    #[test]
    fn test_malformed_json_yields_empty_list() {
        let list = TaskList::from_json(b"{\"title\": ");
        assert!(list.is_empty());
        let list = TaskList::from_json(b"");
        assert!(list.is_empty());
    }

    #[test]
    fn test_reload_replaces_previous_contents() {
        let mut list = TaskList::from_json(br#"[{"title": "Old"}]"#);
        list.reload_from_json(br#"[{"title": "New"}]"#);
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].title.as_str(), "New");
    }
}
