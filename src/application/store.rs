use tokio::sync::watch;

use super::reducer::{reduce, TodolistsAction, TodolistsState};
use crate::domain::todolist::DomainTodolist;

/// Observable container for the todolists state. Construct one at startup
/// and share it by `Arc` or reference; every mutation goes through
/// [`TodolistsStore::dispatch`].
#[derive(Debug)]
pub struct TodolistsStore {
    state: watch::Sender<TodolistsState>,
}

impl Default for TodolistsStore {
    fn default() -> Self { Self::new(TodolistsState::new()) }
}

impl TodolistsStore {
    pub fn new(initial: TodolistsState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    /// Restore a store from a snapshot produced by [`TodolistsStore::snapshot_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn dispatch(&self, action: TodolistsAction) {
        tracing::debug!(action = action.name(), "dispatch");
        self.state.send_modify(|state| {
            let prev = std::mem::take(state);
            *state = reduce(prev, &action);
        });
    }

    pub fn select_all(&self) -> Vec<DomainTodolist> { self.state.borrow().clone() }

    /// Run a selector against the current state without cloning it.
    pub fn select<T>(&self, f: impl FnOnce(&TodolistsState) -> T) -> T { f(&self.state.borrow()) }

    pub fn subscribe(&self) -> watch::Receiver<TodolistsState> { self.state.subscribe() }

    pub fn snapshot_json(&self) -> serde_json::Result<String> { serde_json::to_string(&*self.state.borrow()) }
}
