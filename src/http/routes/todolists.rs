use axum::{extract::{Path, State}, routing::{get, put}, Json, Router};

use crate::domain::{
    api::{BaseResponse, CreatedItem, Empty, TodolistsApi},
    todolist::{Todolist, TodolistId},
};
use crate::http::types::{ApiError, TitleBody};

#[derive(Clone)]
pub struct AppState<A: TodolistsApi> { pub api: A }

pub fn router<A: TodolistsApi + Clone>(state: AppState<A>) -> Router {
    Router::new()
        .route("/todo-lists", get(list_todolists::<A>).post(create_todolist::<A>))
        .route("/todo-lists/:id", put(rename_todolist::<A>).delete(delete_todolist::<A>))
        .with_state(state)
}

async fn list_todolists<A: TodolistsApi>(State(state): State<AppState<A>>) -> Result<Json<Vec<Todolist>>, ApiError> {
    Ok(Json(state.api.get_todolists().await?))
}

async fn create_todolist<A: TodolistsApi>(State(state): State<AppState<A>>, Json(body): Json<TitleBody>) -> Result<Json<BaseResponse<CreatedItem>>, ApiError> {
    let res = state.api.create_todolist(&body.title).await?;
    tracing::info!(result_code = res.result_code.0, "create todolist");
    Ok(Json(res))
}

async fn rename_todolist<A: TodolistsApi>(State(state): State<AppState<A>>, Path(id): Path<String>, Json(body): Json<TitleBody>) -> Result<Json<BaseResponse<Empty>>, ApiError> {
    let res = state.api.change_todolist_title(&TodolistId(id), &body.title).await?;
    tracing::info!(result_code = res.result_code.0, "rename todolist");
    Ok(Json(res))
}

async fn delete_todolist<A: TodolistsApi>(State(state): State<AppState<A>>, Path(id): Path<String>) -> Result<Json<BaseResponse<Empty>>, ApiError> {
    let res = state.api.delete_todolist(&TodolistId(id)).await?;
    tracing::info!(result_code = res.result_code.0, "delete todolist");
    Ok(Json(res))
}
