use std::sync::Arc;

use axum::body::to_bytes;
use axum::Router;
use serde_json::json;
use todolists::{
    application::{
        status::AppStatusNotifier,
        store::TodolistsStore,
        todolists_service::{TodolistsService, TodolistsServiceImpl},
    },
    config::ApiConfig,
    domain::{error::TodolistsError, todolist::{FilterValue, RequestStatus, TodolistId}},
    http::{routes::todolists as todolists_routes, routing},
    infrastructure::{http_api::HttpTodolistsApi, in_memory_api::{FlakyTodolistsApi, InMemoryTodolistsApi}},
};

fn app(api: InMemoryTodolistsApi) -> Router {
    routing::app(todolists_routes::router(todolists_routes::AppState { api }))
}

#[tokio::test]
async fn acceptance_create_list_rename_delete() {
    let app = app(InMemoryTodolistsApi::new());

    // create
    let res = request(&app, "POST", "/todo-lists", Some(json!({ "title": "Books" }))).await;
    assert_eq!(res.status(), 200);
    let body = read_json(res).await;
    assert_eq!(body["resultCode"], 0);
    let id = body["data"]["item"]["id"].as_str().unwrap().to_string();

    // list
    let res = request(&app, "GET", "/todo-lists", None).await;
    assert_eq!(res.status(), 200);
    let body = read_json(res).await;
    assert_eq!(body[0]["title"], "Books");
    assert!(body[0]["addedDate"].is_string());

    // rename
    let res = request(&app, "PUT", &format!("/todo-lists/{}", id), Some(json!({ "title": "Movies" }))).await;
    assert_eq!(read_json(res).await["resultCode"], 0);

    // rejected rename
    let res = request(&app, "PUT", &format!("/todo-lists/{}", id), Some(json!({ "title": "" }))).await;
    let body = read_json(res).await;
    assert_eq!(body["resultCode"], 1);
    assert_eq!(body["messages"][0], "Title is required");

    // delete
    let res = request(&app, "DELETE", &format!("/todo-lists/{}", id), None).await;
    assert_eq!(read_json(res).await["resultCode"], 0);

    // list empty
    let res = request(&app, "GET", "/todo-lists", None).await;
    assert_eq!(read_json(res).await, json!([]));

    let res = request(&app, "GET", "/health", None).await;
    assert_eq!(res.status(), 200);

    let res = request(&app, "GET", "/todos", None).await;
    assert_eq!(res.status(), 404);
    assert_eq!(read_json(res).await["message"], "no such endpoint");
}

#[tokio::test]
async fn store_round_trip_over_http() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = app(InMemoryTodolistsApi::with_titles(["Books", "Films"]));
    tokio::spawn(async move { axum::serve(listener, server).await.unwrap() });

    let config = ApiConfig { base_url: format!("http://{}", addr), api_key: Some("secret".into()), ..ApiConfig::default() };
    let api = FlakyTodolistsApi::new(HttpTodolistsApi::new(&config).unwrap());
    let notifier = Arc::new(AppStatusNotifier::default());
    let service = TodolistsServiceImpl::new(api.clone(), Arc::new(TodolistsStore::default()), notifier.clone());

    service.fetch_all().await.unwrap();
    let titles: Vec<_> = service.select_all().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["Books", "Films"]);

    let created = service.create("Groceries").await.unwrap();
    let all = service.select_all();
    assert_eq!(all[0].id, created.id);
    assert_eq!(all[0].filter, FilterValue::All);
    assert_eq!(all[0].entity_status, RequestStatus::Idle);

    let books = all.iter().find(|t| t.title == "Books").unwrap().id.clone();
    service.rename(&books, "Movies").await.unwrap();
    service.set_filter(&books, FilterValue::Active);

    let err = service.create(&"x".repeat(101)).await.unwrap_err();
    assert!(matches!(err, TodolistsError::Rejected { .. }));
    assert_eq!(service.select_all().len(), 3);
    assert_eq!(notifier.current().status, RequestStatus::Failed);

    api.set_offline(true);
    assert!(matches!(service.delete(&created.id).await, Err(TodolistsError::Transport(_))));
    let failed = service.select_all().into_iter().find(|t| t.id == created.id).unwrap();
    assert_eq!(failed.entity_status, RequestStatus::Failed);
    api.set_offline(false);

    service.delete(&created.id).await.unwrap();
    service.delete(&TodolistId::new("missing")).await.unwrap();

    // Reloading drops client-only facets.
    service.fetch_all().await.unwrap();
    let all = service.select_all();
    assert_eq!(all.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec!["Movies", "Films"]);
    assert!(all.iter().all(|t| t.filter == FilterValue::All));
}

async fn read_json(res: hyper::Response<axum::body::Body>) -> serde_json::Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}

async fn request(app: &Router, method: &str, path: &str, body: Option<serde_json::Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Request, Method};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}
