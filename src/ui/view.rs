use chrono::NaiveDate;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::task::Task;
use crate::ui::model::{classify, days_left, due_caption, visible_tasks, TaskStatus, ViewQuery};
use crate::ui::summary::{chart_data, stats, timeline, ChartData, Stats, TimelineEntry};

/// A visible task with everything the card needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCard {
    pub task: Task,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
    pub caption: String,
}

impl TaskCard {
    pub fn new(task: Task, today: NaiveDate, config: &DashboardConfig) -> Self {
        Self {
            status: classify(&task, today, config.due_soon_days),
            days_left: days_left(&task, today),
            caption: due_caption(&task, today),
            task,
        }
    }
}

/// Everything derived from one snapshot of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub query: ViewQuery,
    pub today: NaiveDate,
    pub tasks: Vec<TaskCard>,
    pub stats: Stats,
    pub timeline: Vec<TimelineEntry>,
    pub charts: ChartData,
}

impl DashboardView {
    pub fn build(
        tasks: &[Task],
        query: &ViewQuery,
        today: NaiveDate,
        config: &DashboardConfig,
    ) -> Self {
        let cards = visible_tasks(tasks, query)
            .into_iter()
            .map(|task| TaskCard::new(task, today, config))
            .collect();

        Self {
            query: query.clone(),
            today,
            tasks: cards,
            stats: stats(tasks),
            timeline: timeline(tasks, today, config.timeline_limit),
            charts: chart_data(tasks),
        }
    }
}
