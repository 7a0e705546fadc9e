use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::domain::{
    api::{BaseResponse, CreatedItem, Empty, TodolistsApi},
    todolist::{Todolist, TodolistId},
};

pub const MAX_TITLE_LEN: usize = 100;

/// Todolists kept in process memory with the same acceptance rules as the
/// hosted service. Backs the development server and offline runs.
#[derive(Clone, Default)]
pub struct InMemoryTodolistsApi {
    items: Arc<Mutex<Vec<Todolist>>>,
}

impl InMemoryTodolistsApi {
    pub fn new() -> Self { Self::default() }

    pub fn with_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let api = Self::new();
        for title in titles {
            api.insert(title.as_ref());
        }
        {
            let mut items = api.lock();
            items.reverse();
            renumber(&mut items);
        }
        api
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Todolist>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn insert(&self, title: &str) -> Todolist {
        let mut items = self.lock();
        let order = items.first().map(|t| t.order - 1).unwrap_or(0);
        let item = Todolist {
            id: TodolistId(Uuid::new_v4().to_string()),
            title: title.to_string(),
            order,
            added_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        items.insert(0, item.clone());
        item
    }
}

fn renumber(items: &mut [Todolist]) {
    for (i, t) in items.iter_mut().enumerate() { t.order = i as i64; }
}

fn validate_title(title: &str) -> Option<String> {
    let title = title.trim();
    if title.is_empty() { return Some("Title is required".to_string()); }
    if title.chars().count() > MAX_TITLE_LEN {
        return Some(format!("Todolist title length should be less than {MAX_TITLE_LEN} characters"));
    }
    None
}

#[async_trait]
impl TodolistsApi for InMemoryTodolistsApi {
    async fn get_todolists(&self) -> Result<Vec<Todolist>> { Ok(self.lock().clone()) }

    async fn create_todolist(&self, title: &str) -> Result<BaseResponse<CreatedItem>> {
        if let Some(message) = validate_title(title) {
            return Ok(BaseResponse::rejected(CreatedItem::default(), message));
        }
        let item = self.insert(title.trim());
        Ok(BaseResponse::success(CreatedItem { item: Some(item) }))
    }

    async fn delete_todolist(&self, id: &TodolistId) -> Result<BaseResponse<Empty>> {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|t| &t.id != id);
        if items.len() == before {
            return Ok(BaseResponse::rejected(Empty {}, format!("Todolist {id} not found")));
        }
        Ok(BaseResponse::success(Empty {}))
    }

    async fn change_todolist_title(&self, id: &TodolistId, title: &str) -> Result<BaseResponse<Empty>> {
        if let Some(message) = validate_title(title) {
            return Ok(BaseResponse::rejected(Empty {}, message));
        }
        let mut items = self.lock();
        let Some(todolist) = items.iter_mut().find(|t| &t.id == id) else {
            return Ok(BaseResponse::rejected(Empty {}, format!("Todolist {id} not found")));
        };
        todolist.title = title.trim().to_string();
        Ok(BaseResponse::success(Empty {}))
    }
}

/// Wraps another API and fails every call at the transport level while switched on.
#[derive(Clone)]
pub struct FlakyTodolistsApi<A> {
    inner: A,
    offline: Arc<std::sync::atomic::AtomicBool>,
}

impl<A> FlakyTodolistsApi<A> {
    pub fn new(inner: A) -> Self { Self { inner, offline: Arc::default() } }

    pub fn set_offline(&self, offline: bool) { self.offline.store(offline, std::sync::atomic::Ordering::SeqCst); }

    fn check(&self) -> Result<()> {
        if self.offline.load(std::sync::atomic::Ordering::SeqCst) { Err(anyhow!("network is unreachable")) } else { Ok(()) }
    }
}

#[async_trait]
impl<A: TodolistsApi> TodolistsApi for FlakyTodolistsApi<A> {
    async fn get_todolists(&self) -> Result<Vec<Todolist>> {
        self.check()?;
        self.inner.get_todolists().await
    }

    async fn create_todolist(&self, title: &str) -> Result<BaseResponse<CreatedItem>> {
        self.check()?;
        self.inner.create_todolist(title).await
    }

    async fn delete_todolist(&self, id: &TodolistId) -> Result<BaseResponse<Empty>> {
        self.check()?;
        self.inner.delete_todolist(id).await
    }

    async fn change_todolist_title(&self, id: &TodolistId, title: &str) -> Result<BaseResponse<Empty>> {
        self.check()?;
        self.inner.change_todolist_title(id, title).await
    }
}
