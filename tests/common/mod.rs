#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use blog_api::{build_router, config::CorsConfig, seed, state::AppState, storage::MemStorage};
use reqwest::Client;
use serde_json::Value;

pub mod routes {
    pub const POSTS: &str = "/api/posts";
    pub const AUTHORS: &str = "/api/authors";
    pub const HEALTH: &str = "/api/healthcheck";

    pub fn post(id: u64) -> String {
        format!("/api/posts/{id}")
    }

    pub fn like(id: u64) -> String {
        format!("/api/posts/{id}/like")
    }

    pub fn comments(id: u64) -> String {
        format!("/api/posts/{id}/comments")
    }

    pub fn author(id: u64) -> String {
        format!("/api/authors/{id}")
    }

    pub fn author_by_username(username: &str) -> String {
        format!("/api/authors/by-username/{username}")
    }
}

/// A running test server backed by a fresh store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub request_id: Option<String>,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let request_id = res
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            request_id,
            body,
        }
    }
}

impl TestApp {
    /// Spawns a server with the sample posts and comments loaded.
    pub async fn spawn() -> Self {
        Self::spawn_with(true).await
    }

    /// Spawns a server with nothing in the store.
    pub async fn spawn_empty() -> Self {
        Self::spawn_with(false).await
    }

    async fn spawn_with(sample_data: bool) -> Self {
        let store = Arc::new(MemStorage::new());
        if sample_data {
            seed::load_sample_data(&store).await;
        }
        let app = build_router(AppState::new(store), &CorsConfig::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");
        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");
        TestResponse::from_response(res).await
    }

    pub async fn get_with_request_id(&self, path: &str, request_id: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("x-request-id", request_id)
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }
}
