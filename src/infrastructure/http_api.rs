use anyhow::{Context, Result};
use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::config::ApiConfig;
use crate::domain::{
    api::{BaseResponse, CreatedItem, Empty, TodolistsApi},
    todolist::{Todolist, TodolistId},
};

/// `TodolistsApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpTodolistsApi {
    http: Client,
    base_url: String,
}

impl HttpTodolistsApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            headers.insert(HeaderName::from_static("api-key"), HeaderValue::from_str(key).context("API key is not a valid header value")?);
        }
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).context("token is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http = Client::builder().default_headers(headers).timeout(config.timeout).build()?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let res: Response = req.send().await?;
        let status = res.status();
        debug!(%status, url = %res.url(), "todolists api response");
        let res = res.error_for_status()?;
        res.json::<T>().await.context("malformed todolists api response")
    }
}

#[async_trait]
impl TodolistsApi for HttpTodolistsApi {
    async fn get_todolists(&self) -> Result<Vec<Todolist>> {
        self.send(self.http.get(self.url("/todo-lists"))).await
    }

    async fn create_todolist(&self, title: &str) -> Result<BaseResponse<CreatedItem>> {
        self.send(self.http.post(self.url("/todo-lists")).json(&json!({ "title": title }))).await
    }

    async fn delete_todolist(&self, id: &TodolistId) -> Result<BaseResponse<Empty>> {
        self.send(self.http.delete(self.url(&format!("/todo-lists/{id}")))).await
    }

    async fn change_todolist_title(&self, id: &TodolistId, title: &str) -> Result<BaseResponse<Empty>> {
        self.send(self.http.put(self.url(&format!("/todo-lists/{id}"))).json(&json!({ "title": title }))).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn builds_with_credentials() {
        let cfg = ApiConfig { base_url: "http://localhost:1/".into(), api_key: Some("k".into()), token: Some("t".into()), timeout: Duration::from_secs(1) };
        let api = HttpTodolistsApi::new(&cfg).unwrap();
        assert_eq!(api.url("/todo-lists"), "http://localhost:1/todo-lists");
    }

    #[test]
    fn builds_without_credentials() {
        assert!(HttpTodolistsApi::new(&ApiConfig::default()).is_ok());
    }

    #[test]
    fn rejects_header_breaking_key() {
        let cfg = ApiConfig { api_key: Some("bad\nkey".into()), ..ApiConfig::default() };
        assert!(HttpTodolistsApi::new(&cfg).is_err());
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let cfg = ApiConfig { base_url: "http://127.0.0.1:9".into(), timeout: Duration::from_millis(500), ..ApiConfig::default() };
        let api = HttpTodolistsApi::new(&cfg).unwrap();
        assert!(api.get_todolists().await.is_err());
    }
}
