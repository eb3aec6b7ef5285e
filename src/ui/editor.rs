use serde::Serialize;

use crate::task::{Task, TaskId, TaskPayload};
use crate::ui::model::select_by_id;

/// In-progress values of the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` or empty for no deadline.
    pub due_date: String,
}

impl EditDraft {
    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.clone().unwrap_or_default(),
        }
    }
}

/// Single-record edit mode. At most one task is open at a time and it is
/// referenced by id, never by position in the cached collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    open: Option<(TaskId, EditDraft)>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open task `id` for editing, replacing any session already open.
    /// Returns `false` (and leaves no session open) when the id is unknown.
    pub fn open(&mut self, tasks: &[Task], id: TaskId) -> bool {
        self.open = select_by_id(tasks, id).map(|task| (id, EditDraft::from_task(task)));
        self.open.is_some()
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.open.as_ref().map(|(id, _)| *id)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.open.as_ref().map(|(_, draft)| draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.open.as_mut().map(|(_, draft)| draft)
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        self.open = None;
    }

    /// Close the session and build the full-record replacement for it: the
    /// cached record with the draft's title, description and due date laid
    /// over it. `None` when nothing is open or the record has disappeared
    /// from the cache since the session was opened.
    pub fn save(&mut self, tasks: &[Task]) -> Option<(TaskId, TaskPayload)> {
        let (id, draft) = self.open.take()?;
        let base = select_by_id(tasks, id)?;

        let mut payload = base.to_payload();
        payload.title = Some(draft.title);
        payload.description = Some(draft.description);
        payload.due_date = Some(draft.due_date).filter(|value| !value.trim().is_empty());
        Some((id, payload))
    }
}
