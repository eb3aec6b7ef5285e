//! Aggregates over the whole cached collection: stats, timeline and chart data.
//!
//! These ignore the active filter and search term; they always describe
//! every task the client knows about.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::{Task, TaskId};
use crate::ui::model::days_left;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Rounded share of completed tasks, 0 for an empty collection.
    pub percentage: u8,
}

pub fn stats(tasks: &[Task]) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let percentage = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    };
    Stats {
        total,
        completed,
        pending: total - completed,
        percentage,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub id: TaskId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub label: String,
}

pub fn timeline_label(days: i64) -> String {
    match days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Today".to_string(),
        d => format!("{d} days"),
    }
}

/// The first `limit` dated tasks, earliest first.
pub fn timeline(tasks: &[Task], today: NaiveDate, limit: usize) -> Vec<TimelineEntry> {
    let mut dated: Vec<(NaiveDate, &Task)> = tasks
        .iter()
        .filter_map(|task| task.due().map(|due| (due, task)))
        .collect();
    dated.sort_by_key(|(due, _)| *due);

    dated
        .into_iter()
        .take(limit)
        .map(|(due, task)| TimelineEntry {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: due,
            label: timeline_label(days_left(task, today).unwrap_or_default()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionRatio {
    pub completed: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueDateCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub completion: CompletionRatio,
    /// Tasks per due date, earliest date first.
    pub due_dates: Vec<DueDateCount>,
}

pub fn chart_data(tasks: &[Task]) -> ChartData {
    let summary = stats(tasks);
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for due in tasks.iter().filter_map(Task::due) {
        *counts.entry(due).or_default() += 1;
    }

    ChartData {
        completion: CompletionRatio {
            completed: summary.completed,
            pending: summary.pending,
        },
        due_dates: counts
            .into_iter()
            .map(|(date, count)| DueDateCount { date, count })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("date")
    }

    fn task(id: u64, due: Option<&str>, completed: bool) -> Task {
        Task {
            id: TaskId::new(id),
            title: format!("task {id}"),
            description: None,
            due_date: due.map(str::to_string),
            completed,
        }
    }

    #[test]
    fn stats_for_empty_collection_are_zero() {
        assert_eq!(stats(&[]), Stats::default());
    }

    #[test]
    fn stats_round_percentage() {
        let tasks = vec![task(1, None, true), task(2, None, false), task(3, None, false)];
        let summary = stats(&tasks);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.percentage, 33);

        let tasks = vec![task(1, None, true), task(2, None, true), task(3, None, false)];
        assert_eq!(stats(&tasks).percentage, 67);
    }

    #[test]
    fn timeline_orders_dated_tasks_and_truncates() {
        let tasks: Vec<Task> = (1..=8)
            .map(|i| task(i, Some(&format!("2026-10-{:02}", 30 - i)), false))
            .chain([task(20, None, false), task(21, Some("never"), false)])
            .collect();
        let entries = timeline(&tasks, today(), 6);
        assert_eq!(entries.len(), 6);
        let ids: Vec<u64> = entries.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4, 3]);
    }

    #[test]
    fn timeline_labels_relative_days() {
        assert_eq!(timeline_label(-2), "Overdue");
        assert_eq!(timeline_label(0), "Today");
        assert_eq!(timeline_label(4), "4 days");
    }

    #[test]
    fn chart_data_groups_by_due_date() {
        let tasks = vec![
            task(1, Some("2026-10-20"), false),
            task(2, Some("2026-10-18"), true),
            task(3, Some("2026-10-20"), false),
            task(4, None, false),
        ];
        let charts = chart_data(&tasks);
        assert_eq!(charts.completion, CompletionRatio { completed: 1, pending: 3 });
        let points: Vec<(String, usize)> = charts
            .due_dates
            .iter()
            .map(|p| (p.date.to_string(), p.count))
            .collect();
        assert_eq!(
            points,
            vec![("2026-10-18".to_string(), 1), ("2026-10-20".to_string(), 2)]
        );
    }
}
