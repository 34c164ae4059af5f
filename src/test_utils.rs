use axum::{Router, body::Body, http::Request, response::Response};
use clap::Parser;
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, ConnectionTrait};
use tower::ServiceExt;

use crate::app::create_app;
use crate::config::Config;
use crate::database::connect_and_migrate;
use crate::state::AppState;

pub fn test_config() -> Config {
    Config::parse_from([
        "certificate_service",
        "--database-url",
        "sqlite::memory:",
        "--verify-base-url",
        "https://certs.example.org",
        "--swagger-enabled",
        "false",
    ])
}

pub async fn test_state() -> AppState {
    let config = test_config();
    // Every pooled connection to sqlite::memory: is its own database
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = connect_and_migrate(options).await.expect("in-memory database");
    AppState::new(db, config)
}

pub async fn test_app() -> Router {
    create_app(test_state().await).await.expect("router")
}

/// App whose `certificate` table is gone, so every store call fails.
pub async fn test_app_with_broken_store() -> Router {
    let state = test_state().await;
    state
        .db
        .execute_unprepared("DROP TABLE certificate")
        .await
        .expect("drop certificate table");
    create_app(state).await.expect("router")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("infallible router")
}

pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
