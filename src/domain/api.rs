use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::todolist::{Todolist, TodolistId};

/// Server-side outcome of a request, independent of transport success.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ResultCode(pub i32);

impl ResultCode {
    pub const SUCCESS: ResultCode = ResultCode(0);
    pub const ERROR: ResultCode = ResultCode(1);
    pub const CAPTCHA_ERROR: ResultCode = ResultCode(10);

    pub fn is_success(self) -> bool { self == Self::SUCCESS }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// Envelope the server wraps every mutating response in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T> {
    pub result_code: ResultCode,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub fields_errors: Vec<FieldError>,
    pub data: T,
}

impl<T> BaseResponse<T> {
    pub fn success(data: T) -> Self {
        Self { result_code: ResultCode::SUCCESS, messages: Vec::new(), fields_errors: Vec::new(), data }
    }

    pub fn rejected(data: T, message: impl Into<String>) -> Self {
        Self { result_code: ResultCode::ERROR, messages: vec![message.into()], fields_errors: Vec::new(), data }
    }
}

/// `data` of a create response. Rejections carry no item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Todolist>,
}

/// `data` payload of responses that carry nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Empty {}

/// Remote todolists API. Transport failures come back as `Err`; server
/// rejections come back as `Ok` with a non-success result code.
#[async_trait]
pub trait TodolistsApi: Send + Sync + 'static {
    async fn get_todolists(&self) -> anyhow::Result<Vec<Todolist>>;
    async fn create_todolist(&self, title: &str) -> anyhow::Result<BaseResponse<CreatedItem>>;
    async fn delete_todolist(&self, id: &TodolistId) -> anyhow::Result<BaseResponse<Empty>>;
    async fn change_todolist_title(&self, id: &TodolistId, title: &str) -> anyhow::Result<BaseResponse<Empty>>;
}

#[async_trait]
impl<A: TodolistsApi + ?Sized> TodolistsApi for std::sync::Arc<A> {
    async fn get_todolists(&self) -> anyhow::Result<Vec<Todolist>> { (**self).get_todolists().await }
    async fn create_todolist(&self, title: &str) -> anyhow::Result<BaseResponse<CreatedItem>> { (**self).create_todolist(title).await }
    async fn delete_todolist(&self, id: &TodolistId) -> anyhow::Result<BaseResponse<Empty>> { (**self).delete_todolist(id).await }
    async fn change_todolist_title(&self, id: &TodolistId, title: &str) -> anyhow::Result<BaseResponse<Empty>> {
        (**self).change_todolist_title(id, title).await
    }
}
