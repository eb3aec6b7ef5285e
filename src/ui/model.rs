use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::{sort_tasks, Task, TaskId};

/// Completion filter applied before search and sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Completed, Filter::Pending];

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Pending => "pending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Completed => "Completed",
            Filter::Pending => "Pending",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match normalize_text(value).as_str() {
            "" | "all" => Ok(Filter::All),
            "completed" | "done" => Ok(Filter::Completed),
            "pending" | "open" => Ok(Filter::Pending),
            other => Err(Error::InvalidArgument(format!(
                "unknown filter '{other}' (expected all|completed|pending)"
            ))),
        }
    }
}

/// Filter and search state of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub filter: Filter,
    #[serde(default)]
    pub search: String,
}

impl ViewQuery {
    pub fn new(filter: Filter, search: impl Into<String>) -> Self {
        Self {
            filter,
            search: search.into(),
        }
    }
}

/// Badge shown next to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
    Overdue,
    DueSoon,
    Pending,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::DueSoon => "Due soon",
            TaskStatus::Pending => "Pending",
        }
    }

    /// CSS modifier used by the card and badge markup.
    pub fn css_class(self) -> &'static str {
        match self {
            TaskStatus::Completed => "status-completed",
            TaskStatus::Overdue => "status-overdue",
            TaskStatus::DueSoon => "status-due-soon",
            TaskStatus::Pending => "status-pending",
        }
    }
}

fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn matches_filter(task: &Task, filter: Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Completed => task.completed,
        Filter::Pending => !task.completed,
    }
}

/// Case-insensitive substring match over the title and description.
pub fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let content = format!(
        "{} {}",
        task.title,
        task.description.as_deref().unwrap_or_default()
    );
    content.to_lowercase().contains(&term.to_lowercase())
}

/// Filter, search and sort the cached collection.
pub fn visible_tasks(tasks: &[Task], query: &ViewQuery) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_filter(task, query.filter))
        .filter(|task| matches_search(task, &query.search))
        .cloned()
        .collect();
    sort_tasks(&mut visible);
    visible
}

/// Whole days from `today` until the task is due. `None` when the task has
/// no due date or the date does not parse.
pub fn days_left(task: &Task, today: NaiveDate) -> Option<i64> {
    task.due().map(|due| (due - today).num_days())
}

pub fn classify(task: &Task, today: NaiveDate, due_soon_days: i64) -> TaskStatus {
    if task.completed {
        return TaskStatus::Completed;
    }
    match days_left(task, today) {
        Some(days) if days < 0 => TaskStatus::Overdue,
        Some(days) if days <= due_soon_days => TaskStatus::DueSoon,
        _ => TaskStatus::Pending,
    }
}

pub fn format_days_left(days: i64) -> String {
    match days {
        d if d < 0 => format!("Overdue {}d", d.abs()),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d => format!("{d} days left"),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Caption under a task: formatted date plus the relative deadline.
pub fn due_caption(task: &Task, today: NaiveDate) -> String {
    if task.due_date.as_deref().map(str::trim).unwrap_or_default().is_empty() {
        return "No due date".to_string();
    }
    match task.due() {
        Some(due) => format!(
            "{} · {}",
            format_date(due),
            format_days_left((due - today).num_days())
        ),
        None => "Invalid date".to_string(),
    }
}

/// Look a task up by id in the cached collection.
pub fn select_by_id(tasks: &[Task], id: TaskId) -> Option<&Task> {
    tasks.iter().find(|task| task.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("date")
    }

    fn task(id: u64, title: &str, description: Option<&str>, due: Option<&str>, completed: bool) -> Task {
        Task {
            id: TaskId::new(id),
            title: title.to_string(),
            description: description.map(str::to_string),
            due_date: due.map(str::to_string),
            completed,
        }
    }

    #[test]
    fn filter_parses_known_names() {
        assert_eq!("Completed".parse::<Filter>().expect("filter"), Filter::Completed);
        assert_eq!("".parse::<Filter>().expect("filter"), Filter::All);
        assert!("archived".parse::<Filter>().is_err());
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let t = task(1, "Read Chapter 3", Some("Thermodynamics notes"), None, false);
        assert!(matches_search(&t, "chapter"));
        assert!(matches_search(&t, "THERMO"));
        assert!(matches_search(&t, ""));
        assert!(!matches_search(&t, "calculus"));
    }

    #[test]
    fn search_tolerates_missing_description() {
        let t = task(1, "Essay", None, None, false);
        assert!(matches_search(&t, "ess"));
        assert!(!matches_search(&t, "notes"));
    }

    #[test]
    fn filter_combines_with_search() {
        let tasks = vec![
            task(1, "Lab report", None, None, true),
            task(2, "Lab prep", None, None, false),
            task(3, "Essay", None, None, false),
        ];
        let visible = visible_tasks(&tasks, &ViewQuery::new(Filter::Pending, "lab"));
        let ids: Vec<u64> = visible.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn days_left_counts_whole_days() {
        assert_eq!(days_left(&task(1, "a", None, Some("2026-10-16"), false), today()), Some(0));
        assert_eq!(days_left(&task(1, "a", None, Some("2026-10-15"), false), today()), Some(-1));
        assert_eq!(days_left(&task(1, "a", None, Some("2026-10-26"), false), today()), Some(10));
        assert_eq!(days_left(&task(1, "a", None, None, false), today()), None);
        assert_eq!(days_left(&task(1, "a", None, Some("soon"), false), today()), None);
    }

    #[test]
    fn classify_uses_due_soon_window() {
        let due = |d: &str| task(1, "a", None, Some(d), false);
        assert_eq!(classify(&due("2026-10-15"), today(), 3), TaskStatus::Overdue);
        assert_eq!(classify(&due("2026-10-16"), today(), 3), TaskStatus::DueSoon);
        assert_eq!(classify(&due("2026-10-19"), today(), 3), TaskStatus::DueSoon);
        assert_eq!(classify(&due("2026-10-20"), today(), 3), TaskStatus::Pending);
        assert_eq!(classify(&due("garbage"), today(), 3), TaskStatus::Pending);
        assert_eq!(
            classify(&task(1, "a", None, Some("2026-10-01"), true), today(), 3),
            TaskStatus::Completed
        );
    }

    #[test]
    fn due_caption_describes_deadline() {
        let due = |d: Option<&str>| task(1, "a", None, d, false);
        assert_eq!(due_caption(&due(Some("2026-10-16")), today()), "Fri, Oct 16 · Due today");
        assert_eq!(due_caption(&due(Some("2026-10-17")), today()), "Sat, Oct 17 · Due tomorrow");
        assert_eq!(due_caption(&due(Some("2026-10-13")), today()), "Tue, Oct 13 · Overdue 3d");
        assert_eq!(due_caption(&due(Some("2026-10-21")), today()), "Wed, Oct 21 · 5 days left");
        assert_eq!(due_caption(&due(None), today()), "No due date");
        assert_eq!(due_caption(&due(Some("31/31/2026")), today()), "Invalid date");
    }

    #[test]
    fn select_by_id_finds_by_key() {
        let tasks = vec![task(4, "a", None, None, false), task(9, "b", None, None, false)];
        assert_eq!(select_by_id(&tasks, TaskId::new(9)).map(|t| t.title.as_str()), Some("b"));
        assert!(select_by_id(&tasks, TaskId::new(5)).is_none());
    }
}
