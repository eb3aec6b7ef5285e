//! study-organizer dashboard command implementation
//!
//! Prints stats, the task list, the timeline and text charts. `--html`
//! prints the same page the server renders at `/app`.

use super::task::card_line;
use super::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::ui::model::format_date;
use crate::ui::render::render_dashboard;
use crate::ui::{today, Filter};

pub struct DashboardOptions {
    pub filter: Filter,
    pub search: String,
    pub html: bool,
}

pub async fn run(context: &Context, options: DashboardOptions) -> Result<()> {
    if options.html && context.output.json {
        return Err(Error::InvalidArgument(
            "--html cannot be combined with --json".to_string(),
        ));
    }

    let mut session = context.session()?;
    session.set_filter(options.filter);
    session.set_search(options.search);
    session.refresh().await?;
    let view = session.view(today());

    if options.html {
        println!("{}", render_dashboard(&view, session.tasks(), session.editor()));
        return Ok(());
    }

    let stats = view.stats;
    let mut human = HumanOutput::new(format!(
        "study-organizer dashboard: {}% complete",
        stats.percentage
    ));
    human.push_summary("total", stats.total.to_string());
    human.push_summary("completed", stats.completed.to_string());
    human.push_summary("pending", stats.pending.to_string());
    human.push_summary("filter", view.query.filter.label());
    if !view.query.search.is_empty() {
        human.push_summary("search", view.query.search.clone());
    }

    for card in &view.tasks {
        human.push_item("Tasks", card_line(card));
    }
    if view.tasks.is_empty() {
        human.push_item("Tasks", "No tasks match the current filters.");
    }

    for entry in &view.timeline {
        human.push_item(
            "Timeline",
            format!("{} · {} ({})", format_date(entry.due_date), entry.title, entry.label),
        );
    }
    if view.timeline.is_empty() {
        human.push_item("Timeline", "No tasks with a due date yet.");
    }

    for line in session.charts().backend().lines() {
        human.push_item("Charts", line);
    }

    emit_success(context.output, "dashboard", &view, Some(&human))
}
