//! Asana webhook relay against mocked Asana and chat webhook servers

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use botsite_server::db::MemoryStore;
use common::*;

const HOOK_KEY: &str = "hook-key";

fn relay_app(server: &MockServer) -> axum::Router {
    relay_app_with(server, &[])
}

fn relay_app_with(server: &MockServer, extra: &[(&str, &str)]) -> axum::Router {
    let api_url = server.uri();
    let webhook = format!("{}/webhook", api_url);
    let mut vars = vec![
        ("ASANA_KEY", HOOK_KEY),
        ("ASANA_WEBHOOK", webhook.as_str()),
        ("ASANA_API_URL", api_url.as_str()),
        ("ASANA_TOKEN", "pat"),
    ];
    vars.extend_from_slice(extra);
    app_with(config(&vars), Arc::new(MemoryStore::new()))
}

async fn accept_webhooks(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// Embeds posted to the chat webhook, in order
async fn posted_embeds(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == "/webhook")
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).expect("webhook body");
            body["embeds"][0].clone()
        })
        .collect()
}

fn delivery(events: Value) -> axum::http::Request<Body> {
    request("POST", Some("api"), &format!("/asana/{}", HOOK_KEY))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "events": events }).to_string()))
        .unwrap()
}

fn story_event(action: &str) -> Value {
    json!({
        "resource": 101,
        "parent": 202,
        "created_at": "2018-02-20T12:00:00.000Z",
        "user": 303,
        "action": action,
        "type": "story"
    })
}

#[tokio::test]
async fn handshake_echoes_secret_and_announces_hook() {
    let server = MockServer::start().await;
    accept_webhooks(&server).await;
    let app = relay_app(&server);

    let response = send(
        &app,
        request("POST", Some("api"), &format!("/asana/{}", HOOK_KEY))
            .header("X-Hook-Secret", "s3cret")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["X-Hook-Secret"], "s3cret");

    let embeds = posted_embeds(&server).await;
    assert_eq!(
        embeds,
        vec![json!({"title": "Asana", "description": "Hook added", "color": 0x00FF00})]
    );
}

#[tokio::test]
async fn new_comment_is_relayed_with_author() {
    let server = MockServer::start().await;
    accept_webhooks(&server).await;
    Mock::given(method("GET"))
        .and(path("/stories/101"))
        .and(header("authorization", "Bearer pat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"type": "comment", "text": "Looks good", "created_by": {"name": "Ann"}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/202"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"projects": [{"id": 404, "name": "Site"}, {"id": 405, "name": "Bot"}]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/303"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"photo": {"image_128x128": "https://img.example/ann.png"}}
        })))
        .mount(&server)
        .await;

    let app = relay_app(&server);
    let response = send(&app, delivery(json!([story_event("added")]))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    let embeds = posted_embeds(&server).await;
    assert_eq!(
        embeds,
        vec![json!({
            "title": "Comment: Site",
            "description": "Looks good",
            "color": 0x00FF00,
            "url": "https://app.asana.com/0/404/202",
            "author": {"name": "Ann", "icon_url": "https://img.example/ann.png"}
        })]
    );
}

#[tokio::test]
async fn comment_author_without_photo_has_null_icon() {
    let server = MockServer::start().await;
    accept_webhooks(&server).await;
    Mock::given(method("GET"))
        .and(path("/stories/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "comment", "text": "hi", "created_by": {"name": "Bo"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/202"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [{"gid": "900", "name": "Site"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/303"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"photo": null})))
        .mount(&server)
        .await;

    let app = relay_app(&server);
    send(&app, delivery(json!([story_event("added")]))).await;

    let embeds = posted_embeds(&server).await;
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0]["url"], "https://app.asana.com/0/900/202");
    assert_eq!(embeds[0]["author"], json!({"name": "Bo", "icon_url": null}));
}

#[tokio::test]
async fn project_with_id_and_gid_uses_id() {
    let server = MockServer::start().await;
    accept_webhooks(&server).await;
    Mock::given(method("GET"))
        .and(path("/stories/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "comment", "text": "hi", "created_by": {"name": "Cy"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/202"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [{"id": 404, "gid": "404000", "name": "Site"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/303"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"photo": null})))
        .mount(&server)
        .await;

    let app = relay_app(&server);
    send(&app, delivery(json!([story_event("added")]))).await;

    let embeds = posted_embeds(&server).await;
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0]["title"], "Comment: Site");
    assert_eq!(embeds[0]["url"], "https://app.asana.com/0/404/202");
}

#[tokio::test]
async fn other_stories_are_echoed_as_json() {
    let server = MockServer::start().await;
    accept_webhooks(&server).await;
    Mock::given(method("GET"))
        .and(path("/stories/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"type": "system", "text": "moved"}
        })))
        .mount(&server)
        .await;

    let app = relay_app(&server);
    send(&app, delivery(json!([story_event("added")]))).await;

    let embeds = posted_embeds(&server).await;
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0]["title"], "Unknown story action/type: added/system");
    assert_eq!(embeds[0]["color"], 0x0000FF);
    assert_eq!(
        embeds[0]["description"],
        "```json\n{\n    \"text\": \"moved\",\n    \"type\": \"system\"\n}\n```"
    );
}

#[tokio::test]
async fn unknown_event_type_is_reported() {
    let server = MockServer::start().await;
    accept_webhooks(&server).await;
    let app = relay_app(&server);

    let event = json!({
        "resource": 1,
        "parent": null,
        "created_at": "2018-02-20T12:00:00.000Z",
        "user": 2,
        "action": "changed",
        "type": "task"
    });
    send(&app, delivery(json!([event]))).await;

    let embeds = posted_embeds(&server).await;
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0]["title"], "Unknown event");
    let description = embeds[0]["description"].as_str().unwrap();
    assert!(description.starts_with("```json\n{\n    \"action\": \"changed\","));
    assert!(description.contains("\"type\": \"task\""));
}

#[tokio::test]
async fn failing_event_reports_error_and_continues() {
    let server = MockServer::start().await;
    accept_webhooks(&server).await;
    Mock::given(method("GET"))
        .and(path("/stories/101"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = relay_app(&server);
    let unknown = json!({
        "resource": 7, "parent": null, "created_at": "now",
        "user": null, "action": "added", "type": "project"
    });
    let response = send(&app, delivery(json!([story_event("added"), unknown]))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let embeds = posted_embeds(&server).await;
    assert_eq!(embeds.len(), 2);
    assert_eq!(embeds[0]["title"], "Error during webhook");
    assert_eq!(embeds[0]["color"], 0xFF0000);
    let description = embeds[0]["description"].as_str().unwrap();
    assert!(description.starts_with("Failed to handle webhook: "));
    assert!(description.contains("\"resource\": 101"));
    assert_eq!(embeds[1]["title"], "Unknown event");
}

#[tokio::test]
async fn malformed_event_is_reported() {
    let server = MockServer::start().await;
    accept_webhooks(&server).await;
    let app = relay_app(&server);

    send(&app, delivery(json!([{"type": "story"}]))).await;

    let embeds = posted_embeds(&server).await;
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0]["title"], "Error during webhook");
}

#[tokio::test]
async fn webhook_outage_still_answers_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = relay_app(&server);

    let event = json!({
        "resource": 1, "parent": null, "created_at": "now",
        "user": 2, "action": "changed", "type": "task"
    });
    let response = send(&app, delivery(json!([event]))).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The unknown-event embed and the error report both hit the webhook
    assert_eq!(posted_embeds(&server).await.len(), 2);
}

#[tokio::test]
async fn non_json_delivery_is_bad_data() {
    let server = MockServer::start().await;
    let app = relay_app(&server);

    let response = send(
        &app,
        request("POST", Some("api"), &format!("/asana/{}", HOOK_KEY))
            .body(Body::from("not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_code"], 4);
}

#[tokio::test]
async fn slow_relay_outlasting_request_timeout_still_finishes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(700)))
        .mount(&server)
        .await;
    let app = relay_app_with(&server, &[("REQUEST_TIMEOUT_SECS", "1")]);

    let events: Vec<Value> = (1..=3)
        .map(|resource| {
            json!({
                "resource": resource, "parent": null, "created_at": "now",
                "user": 2, "action": "changed", "type": "task"
            })
        })
        .collect();
    let response = send(&app, delivery(Value::Array(events))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    let embeds = posted_embeds(&server).await;
    assert_eq!(embeds.len(), 3);
    assert!(embeds.iter().all(|e| e["title"] == "Unknown event"));
}
