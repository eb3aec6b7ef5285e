//! In-memory task store.
//!
//! The store owns the task collection and the id counter for the lifetime of
//! the server process. Every operation takes the same lock, so concurrent
//! requests are serialized and the last writer wins.

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::task::{Task, TaskFields, TaskId};

const FIRST_TASK_ID: u64 = 1;

#[derive(Debug)]
struct StoreState {
    tasks: Vec<Task>,
    next_id: u64,
}

#[derive(Debug)]
pub struct TaskStore {
    state: Mutex<StoreState>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                tasks: Vec::new(),
                next_id: FIRST_TASK_ID,
            }),
        }
    }

    /// Snapshot of every task, in insertion order.
    pub fn list(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.state
            .lock()
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assign the next id and append the task. Ids are never handed out twice,
    /// even after the task holding the highest id is deleted.
    pub fn create(&self, fields: TaskFields) -> Task {
        let mut state = self.state.lock();
        let id = TaskId::new(state.next_id);
        state.next_id += 1;
        let task = Task::from_fields(id, fields);
        state.tasks.push(task.clone());
        tracing::debug!(id = %id, "task created");
        task
    }

    /// Overwrite every field of task `id` except the id itself.
    pub fn replace(&self, id: TaskId, fields: TaskFields) -> Result<Task> {
        let mut state = self.state.lock();
        let slot = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        *slot = Task::from_fields(id, fields);
        tracing::debug!(id = %id, "task replaced");
        Ok(slot.clone())
    }

    /// Remove task `id`. Unknown ids leave the collection untouched.
    pub fn delete(&self, id: TaskId) -> Option<Task> {
        let mut state = self.state.lock();
        let position = state.tasks.iter().position(|task| task.id == id)?;
        let removed = state.tasks.remove(position);
        tracing::debug!(id = %id, "task deleted");
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskPayload;

    fn fields(title: &str) -> TaskFields {
        TaskPayload::new(title).into_new_fields().expect("fields")
    }

    #[test]
    fn first_task_gets_id_one() {
        let store = TaskStore::new();
        assert_eq!(store.create(fields("a")).id, TaskId::new(1));
    }

    #[test]
    fn ids_are_not_reused_after_deleting_the_newest_task() {
        let store = TaskStore::new();
        store.create(fields("a"));
        let second = store.create(fields("b"));
        store.delete(second.id);
        assert_eq!(store.create(fields("c")).id, TaskId::new(3));
    }

    #[test]
    fn replace_keeps_position_and_id() {
        let store = TaskStore::new();
        let first = store.create(fields("a"));
        store.create(fields("b"));
        let mut update = fields("a, revised");
        update.completed = true;
        let replaced = store.replace(first.id, update).expect("replace");
        assert_eq!(replaced.id, first.id);
        let listed = store.list();
        assert_eq!(listed[0].title, "a, revised");
        assert!(listed[0].completed);
    }

    #[test]
    fn replace_unknown_id_is_not_found() {
        let store = TaskStore::new();
        let err = store.replace(TaskId::new(9), fields("x")).expect_err("missing");
        assert!(matches!(err, Error::TaskNotFound(id) if id == TaskId::new(9)));
    }
}
