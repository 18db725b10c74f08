//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use botsite_core::SiteConfig;
use botsite_server::db::MemoryStore;
use botsite_server::{build_app, AppState};

pub const SERVER_NAME: &str = "pytest.local";
pub const API_KEY: &str = "abcdefg";

/// Config with the test server name and API key, plus extra variables
pub fn config(extra: &[(&str, &str)]) -> SiteConfig {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("SERVER_NAME".to_string(), SERVER_NAME.to_string()),
        ("BOT_API_KEY".to_string(), API_KEY.to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    SiteConfig::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

pub fn app_with(config: SiteConfig, store: Arc<MemoryStore>) -> Router {
    let state = AppState::new(Arc::new(config), store).expect("state");
    build_app(Arc::new(state)).expect("router")
}

pub fn app() -> Router {
    app_with(config(&[]), Arc::new(MemoryStore::new()))
}

/// Request builder addressed to `{subdomain}.pytest.local`, or the bare host
pub fn request(method: &str, subdomain: Option<&str>, path: &str) -> axum::http::request::Builder {
    let host = match subdomain {
        Some(sub) => format!("{}.{}", sub, SERVER_NAME),
        None => SERVER_NAME.to_string(),
    };
    Request::builder().method(method).uri(path).header("host", host)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("utf-8 body")
}
