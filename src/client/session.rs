//! Client-side session: a cached copy of the collection plus the view state
//! (filter, search, edit session, live charts) layered on top of it.
//!
//! Every mutation is sent to the server and followed by a full reload. A
//! failed reload keeps the previous cache so the last view stays on screen.

use chrono::NaiveDate;

use crate::client::ApiClient;
use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use crate::task::{Task, TaskId, TaskPayload};
use crate::ui::chart::{ChartBackend, ChartRegistry};
use crate::ui::editor::EditDraft;
use crate::ui::model::select_by_id;
use crate::ui::summary::chart_data;
use crate::ui::{DashboardView, EditSession, Filter, ViewQuery};

pub struct Session<B: ChartBackend> {
    client: ApiClient,
    tasks: Vec<Task>,
    query: ViewQuery,
    editor: EditSession,
    charts: ChartRegistry<B>,
    dashboard: DashboardConfig,
}

impl<B: ChartBackend> Session<B> {
    pub fn new(client: ApiClient, backend: B, dashboard: DashboardConfig) -> Self {
        Self {
            client,
            tasks: Vec::new(),
            query: ViewQuery::default(),
            editor: EditSession::new(),
            charts: ChartRegistry::new(backend),
            dashboard,
        }
    }

    /// Fetch the collection, replace the cache and redraw the charts.
    pub async fn refresh(&mut self) -> Result<()> {
        self.tasks = self.client.list().await?;
        self.charts.redraw_all(&chart_data(&self.tasks));
        Ok(())
    }

    /// Like [`Session::refresh`], but a failure is logged and the previous
    /// cache is kept. Returns whether the cache was replaced.
    pub async fn reload(&mut self) -> bool {
        match self.refresh().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, url = self.client.base_url(), "failed to refresh tasks");
                false
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        select_by_id(&self.tasks, id)
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.query.filter = filter;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
    }

    pub fn view(&self, today: NaiveDate) -> DashboardView {
        DashboardView::build(&self.tasks, &self.query, today, &self.dashboard)
    }

    pub async fn add(&mut self, payload: TaskPayload) -> Result<Task> {
        let task = self.client.create(&payload).await?;
        tracing::debug!(id = %task.id, "task created");
        self.reload().await;
        Ok(task)
    }

    /// Flip `completed` on the cached record and send the full record back.
    pub async fn toggle(&mut self, id: TaskId) -> Result<Task> {
        let task = self.task(id).ok_or(Error::TaskNotFound(id))?;
        let payload = task.to_payload().with_completed(!task.completed);
        let updated = self.client.replace(id, &payload).await?;
        self.reload().await;
        Ok(updated)
    }

    /// Open task `id` in the edit session.
    pub fn open_edit(&mut self, id: TaskId) -> Result<()> {
        if self.editor.open(&self.tasks, id) {
            Ok(())
        } else {
            Err(Error::TaskNotFound(id))
        }
    }

    pub fn editor(&self) -> &EditSession {
        &self.editor
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.editor.draft_mut()
    }

    /// Send the open draft as a full-record replacement.
    ///
    /// `Ok(None)` when no session was open.
    pub async fn save_edit(&mut self) -> Result<Option<Task>> {
        let Some((id, payload)) = self.editor.save(&self.tasks) else {
            return Ok(None);
        };
        let updated = self.client.replace(id, &payload).await?;
        self.reload().await;
        Ok(Some(updated))
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    pub async fn delete(&mut self, id: TaskId) -> Result<()> {
        self.client.delete(id).await?;
        if self.editor.editing() == Some(id) {
            self.editor.cancel();
        }
        self.reload().await;
        Ok(())
    }

    pub fn charts(&self) -> &ChartRegistry<B> {
        &self.charts
    }
}
