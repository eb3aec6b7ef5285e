//! HTML rendering for the dashboard and the bare list page.
//!
//! Every user-supplied string goes through [`escape_html`] before it is
//! embedded. JSON blocks embedded in `<script>` tags go through
//! [`script_json`] so a `</script>` inside a title cannot close the tag.

use serde::Serialize;

use crate::task::Task;
use crate::ui::chart::ChartSlot;
use crate::ui::editor::EditSession;
use crate::ui::model::{Filter, TaskStatus};
use crate::ui::summary::{Stats, TimelineEntry};
use crate::ui::view::{DashboardView, TaskCard};

const DASHBOARD_PATH: &str = "/app";
const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4/dist/chart.umd.min.js";

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Serialize `value` for a `<script type="application/json">` block.
pub fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
        .replace("<!--", "<\\!--")
}

fn query_string(filter: Filter, search: &str) -> String {
    let mut query = format!("?filter={}", filter.as_str());
    if !search.is_empty() {
        query.push_str("&q=");
        query.push_str(&encode_query_value(search));
    }
    query
}

fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

fn status_badge(status: TaskStatus) -> String {
    format!(
        r#"<span class="badge {}">{}</span>"#,
        status.css_class(),
        status.label()
    )
}

/// One task card. `query` is the current filter/search query string, kept
/// on the edit link so closing the modal returns to the same view.
pub fn render_task_card(card: &TaskCard, query: &str) -> String {
    let task = &card.task;
    let description = task
        .description
        .as_deref()
        .filter(|value| !value.is_empty())
        .unwrap_or("No description");
    let title_class = if task.completed { "title done" } else { "title" };
    let toggle_label = if task.completed {
        "Mark as pending"
    } else {
        "Mark completed"
    };

    format!(
        r#"<article class="task-card {status_class}" data-task-id="{id}">
  <div class="task-head">
    <div>
      <h3 class="{title_class}">{title}</h3>
      <p class="description">{description}</p>
    </div>
    {badge}
  </div>
  <div class="task-foot">
    <p class="due">{caption}</p>
    <div class="actions">
      <button type="button" data-action="toggle" data-task-id="{id}">{toggle_label}</button>
      <a class="button" href="{edit_href}">Edit</a>
      <button type="button" class="danger" data-action="delete" data-task-id="{id}">Delete</button>
    </div>
  </div>
</article>"#,
        status_class = card.status.css_class(),
        id = task.id,
        title = escape_html(&task.title),
        description = escape_html(description),
        badge = status_badge(card.status),
        caption = escape_html(&card.caption),
        edit_href = escape_html(&format!("{DASHBOARD_PATH}{query}&edit={}", task.id)),
    )
}

fn render_task_list(view: &DashboardView) -> String {
    if view.tasks.is_empty() {
        return r#"<p class="empty">No tasks match the current filters.</p>"#.to_string();
    }
    let query = query_string(view.query.filter, &view.query.search);
    view.tasks
        .iter()
        .map(|card| render_task_card(card, &query))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_stats(stats: &Stats) -> String {
    format!(
        r#"<section class="stats">
  <div class="stat"><span class="label">Total</span><span id="totalTasks">{total}</span></div>
  <div class="stat"><span class="label">Completed</span><span id="completedTasks">{completed}</span></div>
  <div class="stat"><span class="label">Pending</span><span id="pendingTasks">{pending}</span></div>
  <div class="stat progress">
    <span class="label">Progress</span><span id="progressValue">{percentage}%</span>
    <div class="bar"><div id="progressBar" style="width: {percentage}%"></div></div>
  </div>
</section>"#,
        total = stats.total,
        completed = stats.completed,
        pending = stats.pending,
        percentage = stats.percentage,
    )
}

fn render_timeline(entries: &[TimelineEntry]) -> String {
    if entries.is_empty() {
        return r#"<p class="empty">No tasks with a due date yet.</p>"#.to_string();
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                r#"<div class="timeline-entry">
  <p class="when">{date}</p>
  <h4>{title}</h4>
  <p class="description">{description}</p>
  <p class="relative">{label}</p>
</div>"#,
                date = crate::ui::model::format_date(entry.due_date),
                title = escape_html(&entry.title),
                description = escape_html(entry.description.as_deref().unwrap_or("No description")),
                label = escape_html(&entry.label),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_filters(view: &DashboardView) -> String {
    let links: Vec<String> = Filter::ALL
        .iter()
        .map(|filter| {
            let class = if *filter == view.query.filter {
                "filter active"
            } else {
                "filter"
            };
            format!(
                r#"<a class="{class}" data-filter="{name}" href="{DASHBOARD_PATH}{query}">{label}</a>"#,
                name = filter.as_str(),
                query = escape_html(&query_string(*filter, &view.query.search)),
                label = filter.label(),
            )
        })
        .collect();

    format!(
        r#"<nav class="filters">{links}</nav>
<form class="search" method="get" action="{DASHBOARD_PATH}">
  <input type="hidden" name="filter" value="{filter}">
  <input id="searchInput" type="search" name="q" placeholder="Search tasks" value="{search}">
</form>"#,
        links = links.join(""),
        filter = view.query.filter.as_str(),
        search = escape_html(&view.query.search),
    )
}

fn render_charts(view: &DashboardView) -> String {
    ChartSlot::ALL
        .iter()
        .map(|slot| {
            format!(
                r#"<figure class="chart"><canvas id="{id}"></canvas></figure>
<script type="application/json" id="{id}-spec">{spec}</script>"#,
                id = slot.canvas_id(),
                spec = script_json(&slot.spec(&view.charts)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_add_form() -> &'static str {
    r#"<form id="taskForm" class="task-form">
  <input name="title" placeholder="Title" required>
  <input name="description" placeholder="Description">
  <input name="dueDate" type="date">
  <button type="submit">Add task</button>
</form>"#
}

fn render_edit_modal(view: &DashboardView, editor: &EditSession) -> String {
    let (Some(id), Some(draft)) = (editor.editing(), editor.draft()) else {
        return String::new();
    };
    format!(
        r#"<div id="editModal" class="modal" data-task-id="{id}">
  <div class="modal-body">
    <h2>Edit task</h2>
    <input id="editTitle" value="{title}">
    <textarea id="editDescription">{description}</textarea>
    <input id="editDueDate" type="date" value="{due}">
    <div class="actions">
      <a id="modalCancel" class="button" href="{DASHBOARD_PATH}{query}">Cancel</a>
      <button type="button" id="modalSave">Save</button>
    </div>
  </div>
</div>"#,
        title = escape_html(&draft.title),
        description = escape_html(&draft.description),
        due = escape_html(&draft.due_date),
        query = escape_html(&query_string(view.query.filter, &view.query.search)),
    )
}

/// Full dashboard page. `tasks` is the cached collection the page script
/// uses to build full-record payloads for toggle and edit.
pub fn render_dashboard(view: &DashboardView, tasks: &[Task], editor: &EditSession) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Study Organizer</title>
<style>{style}</style>
<script src="{CHART_JS_URL}"></script>
</head>
<body data-return="{DASHBOARD_PATH}{query}">
<header><h1>Study Organizer</h1><a class="button" href="{DASHBOARD_PATH}{query}" id="refreshBtn">Refresh</a></header>
{stats}
{form}
<main>
<section class="tasks">
{filters}
<div id="taskList">
{list}
</div>
</section>
<aside>
<section class="charts">
{charts}
</section>
<section id="timelineList" class="timeline">
{timeline}
</section>
</aside>
</main>
{modal}
<script type="application/json" id="tasks-data">{tasks_json}</script>
<script>{script}</script>
</body>
</html>
"#,
        style = DASHBOARD_STYLE,
        query = escape_html(&query_string(view.query.filter, &view.query.search)),
        stats = render_stats(&view.stats),
        form = render_add_form(),
        filters = render_filters(view),
        list = render_task_list(view),
        charts = render_charts(view),
        timeline = render_timeline(&view.timeline),
        modal = render_edit_modal(view, editor),
        tasks_json = script_json(&tasks),
        script = DASHBOARD_SCRIPT,
    )
}

/// First-generation page: every task in store order with a delete control.
pub fn render_basic_list(tasks: &[Task]) -> String {
    let items: Vec<String> = tasks
        .iter()
        .map(|task| {
            format!(
                r#"<div class="task-item">
  <strong>{title}</strong> – {description}
  <br>
  Due: {due}
  <button type="button" class="delete-btn" data-action="delete" data-task-id="{id}">Delete</button>
</div>"#,
                title = escape_html(&task.title),
                description = escape_html(task.description.as_deref().unwrap_or_default()),
                due = escape_html(task.due_date.as_deref().unwrap_or_default()),
                id = task.id,
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Study Organizer</title></head>
<body data-return="/app/basic">
<h1>Study Organizer</h1>
{form}
<div id="taskList">
{items}
</div>
<script type="application/json" id="tasks-data">{tasks_json}</script>
<script>{script}</script>
</body>
</html>
"#,
        form = render_add_form(),
        items = items.join("\n"),
        tasks_json = script_json(&tasks),
        script = DASHBOARD_SCRIPT,
    )
}

const DASHBOARD_STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #0f172a; color: #e2e8f0; margin: 0; padding: 1.5rem; }
header { display: flex; justify-content: space-between; align-items: center; }
main { display: grid; grid-template-columns: 2fr 1fr; gap: 1.5rem; }
.stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; margin: 1rem 0; }
.stat { background: rgba(255,255,255,0.05); border-radius: 1rem; padding: 1rem; display: flex; flex-direction: column; }
.bar { background: rgba(255,255,255,0.1); border-radius: 999px; height: 0.5rem; }
#progressBar { background: #818cf8; height: 100%; border-radius: 999px; }
.task-card { border: 1px solid; border-radius: 1rem; padding: 1rem 1.25rem; margin-bottom: 0.75rem; }
.task-head, .task-foot { display: flex; justify-content: space-between; gap: 0.75rem; }
.title.done { text-decoration: line-through; color: #a7f3d0; }
.badge { font-size: 0.75rem; padding: 0.25rem 0.75rem; border-radius: 999px; height: fit-content; }
.status-completed { border-color: rgba(52,211,153,0.4); }
.status-overdue { border-color: rgba(251,113,133,0.3); }
.status-due-soon { border-color: rgba(251,191,36,0.3); }
.status-pending { border-color: rgba(129,140,248,0.3); }
.badge.status-completed { background: rgba(16,185,129,0.15); color: #a7f3d0; }
.badge.status-overdue { background: rgba(244,63,94,0.15); color: #fecdd3; }
.badge.status-due-soon { background: rgba(245,158,11,0.15); color: #fde68a; }
.badge.status-pending { background: rgba(99,102,241,0.15); color: #c7d2fe; }
.filter { padding: 0.25rem 0.75rem; border-radius: 0.5rem; background: rgba(255,255,255,0.1); color: inherit; text-decoration: none; }
.filter.active { background: rgba(99,102,241,0.4); color: #fff; }
.modal { position: fixed; inset: 0; background: rgba(15,23,42,0.8); display: flex; align-items: center; justify-content: center; }
.modal-body { background: #1e293b; padding: 1.5rem; border-radius: 1rem; display: flex; flex-direction: column; gap: 0.75rem; }
.empty { color: #94a3b8; text-align: center; }
"#;

const DASHBOARD_SCRIPT: &str = r#"
(function () {
  const API_URL = "/tasks";
  const tasks = JSON.parse(document.getElementById("tasks-data").textContent || "[]");
  const returnTo = document.body.dataset.return || "/app";
  const find = (id) => tasks.find((t) => t.id === id);
  const send = (method, url, body) =>
    fetch(url, {
      method,
      headers: body ? { "Content-Type": "application/json" } : {},
      body: body ? JSON.stringify(body) : undefined,
    }).catch((error) => console.error("request failed", error));
  const reload = () => { window.location.href = returnTo; };

  document.querySelectorAll("[data-action]").forEach((button) => {
    button.addEventListener("click", async () => {
      const id = Number(button.dataset.taskId);
      if (button.dataset.action === "delete") {
        await send("DELETE", `${API_URL}/${id}`);
      } else if (button.dataset.action === "toggle") {
        const task = find(id);
        if (!task) return;
        await send("PUT", `${API_URL}/${id}`, { ...task, completed: !task.completed });
      }
      reload();
    });
  });

  const form = document.getElementById("taskForm");
  form?.addEventListener("submit", async (event) => {
    event.preventDefault();
    await send("POST", API_URL, {
      title: form.title.value,
      description: form.description.value,
      dueDate: form.dueDate.value || null,
    });
    reload();
  });

  const modal = document.getElementById("editModal");
  document.getElementById("modalSave")?.addEventListener("click", async () => {
    const id = Number(modal.dataset.taskId);
    const base = find(id);
    if (!base) return reload();
    await send("PUT", `${API_URL}/${id}`, {
      ...base,
      title: document.getElementById("editTitle").value,
      description: document.getElementById("editDescription").value,
      dueDate: document.getElementById("editDueDate").value || null,
    });
    reload();
  });

  if (typeof Chart !== "undefined") {
    ["completionChart", "velocityChart"].forEach((id) => {
      const canvas = document.getElementById(id);
      const spec = document.getElementById(`${id}-spec`);
      if (canvas && spec) new Chart(canvas, JSON.parse(spec.textContent));
    });
  }
})();
"#;
