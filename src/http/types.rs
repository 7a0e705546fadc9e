use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError { pub message: String }

impl IntoResponse for ApiError {
    fn into_response(self) -> Response { (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(self)).into_response() }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self { Self { message: format!("{e:#}") } }
}

#[derive(Debug, Deserialize)]
pub struct TitleBody { pub title: String }
