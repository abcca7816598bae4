use super::*;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct ServerState {
    bodies: Arc<Mutex<Vec<Value>>>,
    auth_headers: Arc<Mutex<Vec<String>>>,
}

async fn list_versions(State(state): State<ServerState>, headers: HeaderMap) -> Json<Value> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.auth_headers.lock().expect("lock").push(auth.to_string());
    }
    Json(json!([
        {"id": "HEAD", "released": false},
        {"id": "1", "released": true, "active_concepts": 12, "description": "first"},
        {"id": "2", "released": false},
    ]))
}

async fn create_version(State(state): State<ServerState>, Json(body): Json<Value>) -> Json<Value> {
    state.bodies.lock().expect("lock").push(body.clone());
    Json(json!({"id": body["id"], "released": false, "url": "/users/alice/collections/MAL/3/"}))
}

async fn edit_version(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.bodies.lock().expect("lock").push(body);
    (
        StatusCode::FORBIDDEN,
        Json(json!({"detail": "You do not have permission to perform this action."})),
    )
}

async fn spawn_server() -> (String, ServerState) {
    let state = ServerState::default();
    let app = Router::new()
        .route(
            "/users/alice/collections/MAL/versions/",
            get(list_versions).post(create_version),
        )
        .route("/users/alice/collections/MAL/2/", put(edit_version))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}"), state)
}

#[tokio::test]
async fn lists_versions_without_head_and_sends_token() {
    let (base, state) = spawn_server().await;
    let service = HttpDictionaryService::new(&base, Some("secret".to_string())).expect("service");

    let versions = service
        .list_versions("/users/alice/collections/MAL/")
        .await
        .expect("versions");

    let ids: Vec<&str> = versions.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(versions[0].concept_count, Some(12));
    assert_eq!(
        state.auth_headers.lock().expect("lock").clone(),
        vec!["Token secret".to_string()]
    );
}

#[tokio::test]
async fn create_version_posts_next_numeric_id() {
    let (base, state) = spawn_server().await;
    let service = HttpDictionaryService::new(&base, None).expect("service");

    let created = service
        .create_version("/users/alice/collections/MAL")
        .await
        .expect("create");

    assert_eq!(created.id.as_str(), "3");
    assert_eq!(
        state.bodies.lock().expect("lock").clone(),
        vec![json!({"id": "3", "released": false})]
    );
}

#[tokio::test]
async fn edit_failure_keeps_server_detail() {
    let (base, state) = spawn_server().await;
    let service = HttpDictionaryService::new(&base, None).expect("service");

    let err = service
        .edit_version(
            "/users/alice/collections/MAL/",
            &EditVersionRequest::new(VersionId::new("2"), true),
        )
        .await
        .expect_err("forbidden");

    assert!(matches!(err.code, ErrorCode::Forbidden));
    assert_eq!(err.message, "You do not have permission to perform this action.");
    assert_eq!(
        state.bodies.lock().expect("lock").clone(),
        vec![json!({"released": true})]
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let service = HttpDictionaryService::new("http://127.0.0.1:9", None).expect("service");
    let err = service
        .list_versions("/users/alice/collections/MAL/")
        .await
        .expect_err("unreachable");
    assert!(matches!(err.code, ErrorCode::Transport));
}

#[test]
fn next_version_id_follows_highest_numeric_id() {
    let existing = vec![
        VersionRecord::new("1", true),
        VersionRecord::new("7", false),
        VersionRecord::new("draft", false),
    ];
    assert_eq!(next_version_id(&existing).as_str(), "8");
    assert_eq!(next_version_id(&[]).as_str(), "1");
    assert_eq!(
        next_version_id(&[VersionRecord::new("v1", false)]).as_str(),
        "2"
    );
}

#[test]
fn saturated_numeric_id_falls_back_to_count() {
    let existing = vec![
        VersionRecord::new("1", true),
        VersionRecord::new("18446744073709551615", false),
    ];
    assert_eq!(next_version_id(&existing).as_str(), "3");
}

#[test]
fn rejects_unparseable_base_url() {
    assert!(HttpDictionaryService::new("not a url", None).is_err());
}
