//! Task commands: list, add, edit, toggle, delete, ping.

use serde::Serialize;

use super::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::task::{Task, TaskId, TaskPayload};
use crate::ui::{today, Filter, TaskCard, ViewQuery};

pub struct ListOptions {
    pub filter: Filter,
    pub search: String,
}

pub struct AddOptions {
    pub title: String,
    pub description: Option<String>,
    pub due: Option<String>,
}

pub struct EditOptions {
    pub id: TaskId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub clear_due: bool,
}

impl EditOptions {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due.is_none() && !self.clear_due
    }
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub query: ViewQuery,
    pub total: usize,
    pub tasks: Vec<TaskCard>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub id: TaskId,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct PingOutput {
    pub api_url: String,
    pub message: String,
}

/// One line per card: `#3 [x] Title · Fri, Oct 16 · Due today (Due soon)`.
pub(crate) fn card_line(card: &TaskCard) -> String {
    let mark = if card.task.completed { "x" } else { " " };
    format!(
        "#{} [{mark}] {} · {} ({})",
        card.task.id,
        card.task.title,
        card.caption,
        card.status.label()
    )
}

pub async fn run_list(context: &Context, options: ListOptions) -> Result<()> {
    let mut session = context.session()?;
    session.set_filter(options.filter);
    session.set_search(options.search);
    session.refresh().await?;

    let view = session.view(today());
    let output = ListOutput {
        query: view.query.clone(),
        total: session.tasks().len(),
        tasks: view.tasks,
    };

    let mut human = HumanOutput::new(format!(
        "study-organizer list: {} of {} task(s)",
        output.tasks.len(),
        output.total
    ));
    human.push_summary("filter", output.query.filter.label());
    if !output.query.search.is_empty() {
        human.push_summary("search", output.query.search.clone());
    }
    for card in &output.tasks {
        human.push_detail(card_line(card));
    }
    if output.tasks.is_empty() {
        human.push_warning("No tasks match the current filters.");
    }

    emit_success(context.output, "list", &output, Some(&human))
}

pub async fn run_add(context: &Context, options: AddOptions) -> Result<()> {
    let mut payload = TaskPayload::new(options.title);
    if let Some(description) = options.description {
        payload = payload.with_description(description);
    }
    if let Some(due) = options.due {
        payload = payload.with_due_date(due);
    }

    let mut session = context.session()?;
    let task = session.add(payload).await?;

    let mut human = HumanOutput::new(format!("study-organizer add: #{} {}", task.id, task.title));
    push_task_summary(&mut human, &task);
    human.push_next_step(format!("study-organizer toggle {}", task.id));
    emit_success(context.output, "add", &task, Some(&human))
}

pub async fn run_edit(context: &Context, options: EditOptions) -> Result<()> {
    if options.is_empty() {
        return Err(Error::InvalidArgument(
            "nothing to change; pass --title, --description, --due or --clear-due".to_string(),
        ));
    }

    let mut session = context.session()?;
    session.refresh().await?;
    session.open_edit(options.id)?;
    if let Some(draft) = session.draft_mut() {
        if let Some(title) = options.title {
            draft.title = title;
        }
        if let Some(description) = options.description {
            draft.description = description;
        }
        if let Some(due) = options.due {
            draft.due_date = due;
        }
        if options.clear_due {
            draft.due_date.clear();
        }
    }

    let task = session
        .save_edit()
        .await?
        .ok_or(Error::TaskNotFound(options.id))?;

    let mut human = HumanOutput::new(format!("study-organizer edit: #{} {}", task.id, task.title));
    push_task_summary(&mut human, &task);
    emit_success(context.output, "edit", &task, Some(&human))
}

pub async fn run_toggle(context: &Context, id: TaskId) -> Result<()> {
    let mut session = context.session()?;
    session.refresh().await?;
    let task = session.toggle(id).await?;

    let state = if task.completed { "completed" } else { "pending" };
    let mut human = HumanOutput::new(format!("study-organizer toggle: #{} is {state}", task.id));
    push_task_summary(&mut human, &task);
    emit_success(context.output, "toggle", &task, Some(&human))
}

pub async fn run_delete(context: &Context, id: TaskId) -> Result<()> {
    let mut session = context.session()?;
    session.delete(id).await?;

    let output = DeleteOutput { id, deleted: true };
    let human = HumanOutput::new(format!("study-organizer delete: #{id}"));
    emit_success(context.output, "delete", &output, Some(&human))
}

pub async fn run_ping(context: &Context) -> Result<()> {
    let client = context.client()?;
    let message = client.liveness().await?;

    let output = PingOutput {
        api_url: client.base_url().to_string(),
        message,
    };
    let mut human = HumanOutput::new(format!("study-organizer ping: {}", output.message));
    human.push_summary("api", output.api_url.clone());
    emit_success(context.output, "ping", &output, Some(&human))
}

fn push_task_summary(human: &mut HumanOutput, task: &Task) {
    human.push_summary("id", task.id.to_string());
    human.push_summary("title", task.title.clone());
    if let Some(description) = &task.description {
        human.push_summary("description", description.clone());
    }
    human.push_summary(
        "due",
        task.due_date.clone().unwrap_or_else(|| "none".to_string()),
    );
    human.push_summary("completed", task.completed.to_string());
}
