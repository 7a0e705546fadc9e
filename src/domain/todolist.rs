use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TodolistId(pub String);

impl TodolistId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for TodolistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for TodolistId {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

/// A todolist as the server stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todolist {
    pub id: TodolistId,
    pub title: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub added_date: String,
}

/// Which tasks of a todolist the UI shows. Never sent to the server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FilterValue {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterValue {
    pub fn as_str(&self) -> &'static str {
        match self { FilterValue::All => "all", FilterValue::Active => "active", FilterValue::Completed => "completed" }
    }

    /// Next filter in display order, wrapping around.
    pub fn next(self) -> Self {
        match self { FilterValue::All => FilterValue::Active, FilterValue::Active => FilterValue::Completed, FilterValue::Completed => FilterValue::All }
    }
}

/// Progress of an in-flight request, used both per record and for the app as a whole.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Succeeded => "succeeded",
            RequestStatus::Failed => "failed",
        }
    }
}

/// A todolist plus the client-only facets the store tracks for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainTodolist {
    pub id: TodolistId,
    pub title: String,
    pub order: i64,
    pub added_date: String,
    pub filter: FilterValue,
    pub entity_status: RequestStatus,
}

impl From<Todolist> for DomainTodolist {
    fn from(tl: Todolist) -> Self {
        Self {
            id: tl.id,
            title: tl.title,
            order: tl.order,
            added_date: tl.added_date,
            filter: FilterValue::default(),
            entity_status: RequestStatus::default(),
        }
    }
}
