#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use videogame_catalogue::config::{Config, Environment};
use videogame_catalogue::state::AppState;

/// In-memory `SQLite` database with every migration applied.
pub async fn test_db() -> DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();
    db
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        database_max_connections: 1,
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        frontend_url: "http://localhost:5173".to_string(),
    }
}

/// Build the app router backed by a fresh in-memory database.
pub async fn test_app() -> Router {
    let state = AppState::new(test_db().await, test_config());
    videogame_catalogue::routes::router().with_state(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, body_str)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_default()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default()
}

/// Test helper: send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, empty_request("GET", uri)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, empty_request("DELETE", uri)).await
}

/// PUT without a body, as used by the restore endpoints.
pub async fn put(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, empty_request("PUT", uri)).await
}

pub async fn post_json(app: &Router, uri: &str, body: &serde_json::Value) -> (StatusCode, String) {
    send(app, json_request("POST", uri, body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: &serde_json::Value) -> (StatusCode, String) {
    send(app, json_request("PUT", uri, body)).await
}

/// Parse a response body, `Null` when it is not JSON.
pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or(serde_json::Value::Null)
}
