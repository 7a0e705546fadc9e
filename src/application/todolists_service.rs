use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::reducer::{select_todolist, TodolistsAction};
use super::status::StatusNotifier;
use super::store::TodolistsStore;
use crate::domain::api::{BaseResponse, TodolistsApi};
use crate::domain::error::TodolistsError;
use crate::domain::todolist::{DomainTodolist, FilterValue, RequestStatus, Todolist, TodolistId};

/// Operations the UI calls. Network-backed ones only touch the store once the
/// server has confirmed; failures come back as `Err` and are also pushed to
/// the status notifier.
#[async_trait]
pub trait TodolistsService: Send + Sync + 'static {
    async fn fetch_all(&self) -> Result<(), TodolistsError>;
    async fn create(&self, title: &str) -> Result<Todolist, TodolistsError>;
    async fn delete(&self, id: &TodolistId) -> Result<(), TodolistsError>;
    async fn rename(&self, id: &TodolistId, title: &str) -> Result<(), TodolistsError>;
    fn set_filter(&self, id: &TodolistId, filter: FilterValue);
    fn select_all(&self) -> Vec<DomainTodolist>;
}

pub struct TodolistsServiceImpl<A: TodolistsApi, N: StatusNotifier> {
    api: A,
    store: Arc<TodolistsStore>,
    notifier: N,
}

impl<A: TodolistsApi, N: StatusNotifier> TodolistsServiceImpl<A, N> {
    pub fn new(api: A, store: Arc<TodolistsStore>, notifier: N) -> Self { Self { api, store, notifier } }

    fn contains(&self, id: &TodolistId) -> bool { self.store.select(|s| select_todolist(s, id).is_some()) }

    fn set_entity_status(&self, id: &TodolistId, status: RequestStatus) {
        self.store.dispatch(TodolistsAction::ChangeEntityStatus { id: id.clone(), status });
    }

    fn begin(&self) {
        self.notifier.set_error(None);
        self.notifier.set_status(RequestStatus::Loading);
    }

    fn succeed(&self) { self.notifier.set_status(RequestStatus::Succeeded); }

    fn fail(&self, op: &'static str, err: TodolistsError) -> TodolistsError {
        warn!(op, error = %err, "todolists request failed");
        self.notifier.set_error(Some(err.user_message()));
        self.notifier.set_status(RequestStatus::Failed);
        err
    }
}

fn confirm<T>(res: BaseResponse<T>) -> Result<T, TodolistsError> {
    if res.result_code.is_success() {
        Ok(res.data)
    } else {
        Err(TodolistsError::Rejected { result_code: res.result_code, messages: res.messages })
    }
}

fn normalize_title(title: &str) -> Result<&str, TodolistsError> {
    let title = title.trim();
    if title.is_empty() { Err(TodolistsError::InvalidTitle) } else { Ok(title) }
}

#[async_trait]
impl<A: TodolistsApi, N: StatusNotifier> TodolistsService for TodolistsServiceImpl<A, N> {
    async fn fetch_all(&self) -> Result<(), TodolistsError> {
        self.begin();
        match self.api.get_todolists().await {
            Ok(lists) => {
                info!(count = lists.len(), "fetched todolists");
                self.store.dispatch(TodolistsAction::SetTodolists(lists));
                self.succeed();
                Ok(())
            }
            Err(e) => Err(self.fail("fetch_all", TodolistsError::Transport(e))),
        }
    }

    async fn create(&self, title: &str) -> Result<Todolist, TodolistsError> {
        let title = normalize_title(title)?;
        self.begin();
        let result = match self.api.create_todolist(title).await {
            Ok(res) => confirm(res).and_then(|data| {
                data.item.ok_or_else(|| TodolistsError::Transport(anyhow!("create confirmed without an item")))
            }),
            Err(e) => Err(TodolistsError::Transport(e)),
        };
        match result {
            Ok(item) => {
                info!(id = %item.id, "created todolist");
                self.store.dispatch(TodolistsAction::CreateTodolist(item.clone()));
                self.succeed();
                Ok(item)
            }
            Err(e) => Err(self.fail("create", e)),
        }
    }

    async fn delete(&self, id: &TodolistId) -> Result<(), TodolistsError> {
        if !self.contains(id) {
            debug!(%id, "delete: todolist not in store");
            return Ok(());
        }
        self.begin();
        self.set_entity_status(id, RequestStatus::Loading);
        let result = match self.api.delete_todolist(id).await {
            Ok(res) => confirm(res).map(drop),
            Err(e) => Err(TodolistsError::Transport(e)),
        };
        match result {
            Ok(()) => {
                info!(%id, "deleted todolist");
                self.store.dispatch(TodolistsAction::DeleteTodolist { id: id.clone() });
                self.succeed();
                Ok(())
            }
            Err(e) => {
                self.set_entity_status(id, RequestStatus::Failed);
                Err(self.fail("delete", e))
            }
        }
    }

    async fn rename(&self, id: &TodolistId, title: &str) -> Result<(), TodolistsError> {
        if !self.contains(id) {
            debug!(%id, "rename: todolist not in store");
            return Ok(());
        }
        let title = normalize_title(title)?;
        self.begin();
        self.set_entity_status(id, RequestStatus::Loading);
        let result = match self.api.change_todolist_title(id, title).await {
            Ok(res) => confirm(res).map(drop),
            Err(e) => Err(TodolistsError::Transport(e)),
        };
        match result {
            Ok(()) => {
                info!(%id, "renamed todolist");
                self.store.dispatch(TodolistsAction::ChangeTitle { id: id.clone(), title: title.to_string() });
                self.set_entity_status(id, RequestStatus::Idle);
                self.succeed();
                Ok(())
            }
            Err(e) => {
                self.set_entity_status(id, RequestStatus::Failed);
                Err(self.fail("rename", e))
            }
        }
    }

    fn set_filter(&self, id: &TodolistId, filter: FilterValue) {
        self.store.dispatch(TodolistsAction::ChangeFilter { id: id.clone(), filter });
    }

    fn select_all(&self) -> Vec<DomainTodolist> { self.store.select_all() }
}
