#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use futures::StreamExt;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use idea_garden_ai::{AiError, AiProvider, CompletionOptions, TokenStream};
use idea_garden_api::config::ServerConfig;
use idea_garden_api::router::build_app_router;
use idea_garden_api::state::AppState;
use idea_garden_core::chat::PromptMessage;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
    }
}

/// Build the full application router with no AI provider configured.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_app(pool, None)
}

/// Build the full application router backed by `provider`.
pub fn build_test_app_with_provider(pool: SqlitePool, provider: Arc<dyn AiProvider>) -> Router {
    build_app(pool, Some(provider))
}

fn build_app(pool: SqlitePool, provider: Option<Arc<dyn AiProvider>>) -> Router {
    build_test_app_with_config(pool, test_config(), provider)
}

/// Build the full application router with a custom configuration.
pub fn build_test_app_with_config(
    pool: SqlitePool,
    config: ServerConfig,
    provider: Option<Arc<dyn AiProvider>>,
) -> Router {
    let state = AppState::new(pool, config.clone(), provider);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an idea through the API and return its id.
pub async fn create_idea(app: Router, body: serde_json::Value) -> i64 {
    let response = post_json(app, "/api/ideas", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Fake provider
// ---------------------------------------------------------------------------

/// Replies with a fixed text, streamed in 4-character chunks; embeds text
/// as `[len, vowels, 1]`. Completions and stream starts wait `delay`.
pub struct FakeProvider {
    pub reply: String,
    pub fail_completions: bool,
    pub delay: Duration,
}

impl FakeProvider {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail_completions: false,
            delay: Duration::ZERO,
        })
    }

    pub fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail_completions: false,
            delay,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: String::new(),
            fail_completions: true,
            delay: Duration::ZERO,
        })
    }
}

#[async_trait]
impl AiProvider for FakeProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError> {
        let vowels = text.chars().filter(|c| "aeiou".contains(*c)).count();
        Ok(vec![text.len() as f32, vowels as f32, 1.0])
    }

    async fn complete(
        &self,
        _messages: &[PromptMessage],
        _options: CompletionOptions,
    ) -> Result<String, AiError> {
        tokio::time::sleep(self.delay).await;
        if self.fail_completions {
            return Err(AiError::Api {
                status: 500,
                body: "upstream exploded".into(),
            });
        }
        Ok(self.reply.clone())
    }

    async fn stream(
        &self,
        _messages: &[PromptMessage],
        _options: CompletionOptions,
    ) -> Result<TokenStream, AiError> {
        tokio::time::sleep(self.delay).await;
        if self.fail_completions {
            return Err(AiError::Api {
                status: 401,
                body: "bad key".into(),
            });
        }
        let chars: Vec<char> = self.reply.chars().collect();
        let tokens: Vec<Result<String, AiError>> = chars
            .chunks(4)
            .map(|c| Ok(c.iter().collect::<String>()))
            .collect();
        Ok(futures::stream::iter(tokens).boxed())
    }
}
