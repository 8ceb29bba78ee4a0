use std::str::FromStr;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::db::queries::{categories, questions};
use trivia_api::db::{run_migrations, NewQuestion};
use trivia_api::server::app::router;
use trivia_api::service::TriviaService;

pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");
    run_migrations(&pool).await.expect("migrations failed");
    pool
}

pub fn app(pool: SqlitePool) -> Router {
    router(TriviaService::new(pool, 10))
}

/// Seeds `Science` and `Art` and `per_category` questions in each,
/// interleaved so ids alternate between the two categories.
pub async fn seed(pool: &SqlitePool, per_category: usize) -> (i64, i64) {
    let science = categories::create_category(pool, "Science")
        .await
        .expect("create category");
    let art = categories::create_category(pool, "Art")
        .await
        .expect("create category");
    for n in 0..per_category {
        for (category, name) in [(science, "science"), (art, "art")] {
            questions::create_question(
                pool,
                &NewQuestion {
                    question: format!("What is {name} fact number {n}?"),
                    answer: format!("Fact {n}"),
                    category,
                    difficulty: (n % 5) as i64 + 1,
                },
            )
            .await
            .expect("create question");
        }
    }
    (science, art)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    send_request(app, req.body(body).expect("request build should succeed")).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    TestResponse {
        status,
        headers,
        body,
    }
}
