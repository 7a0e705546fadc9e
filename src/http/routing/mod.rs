use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;

/// Adds the health probe and a JSON 404 around the API routes.
pub fn app(api_routes: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .merge(api_routes)
        .fallback(|| async { (StatusCode::NOT_FOUND, Json(json!({ "message": "no such endpoint" }))) })
}
