// Shared test utilities for integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fyyur_db::AppState;
use fyyur_migration::{Migrator, MigratorTrait};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, ConnectionTrait, Database};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// The full router over a migrated in-memory SQLite database.
pub async fn test_app() -> Router {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    db.execute_unprepared("PRAGMA foreign_keys = ON").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    fyyur_server::router(Arc::new(AppState { db }))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let location = headers
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse {
        status,
        location,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// POSTs an already url-encoded form body.
pub async fn post_form(app: &Router, uri: &str, body: &str) -> TestResponse {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub fn venue_body(name: &str, address: &str, genres: &[&str]) -> String {
    let mut body = format!(
        "name={}&city=San+Francisco&state=CA&address={}&seeking_talent=y",
        encode(name),
        encode(address)
    );
    for g in genres {
        body.push_str(&format!("&genres={}", encode(g)));
    }
    body
}

pub fn artist_body(name: &str, genres: &[&str]) -> String {
    let mut body = format!(
        "name={}&city=San+Francisco&state=CA&website_link={}",
        encode(name),
        encode(&format!("https://example.com/{}", name.replace(' ', "-")))
    );
    for g in genres {
        body.push_str(&format!("&genres={}", encode(g)));
    }
    body
}

pub fn show_body(artist_id: i32, venue_id: i32, start_time: &str) -> String {
    format!(
        "artist_id={artist_id}&venue_id={venue_id}&start_time={}",
        encode(start_time)
    )
}

/// Just enough percent-encoding for test fixtures.
pub fn encode(s: &str) -> String {
    serde_html_form::to_string([("v", s)])
        .unwrap()
        .trim_start_matches("v=")
        .to_string()
}
