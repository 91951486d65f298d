#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use mathrush_api::{
    config::Config,
    create_router,
    generator::{Constraint, FamilyKind},
    services::{leaderboard::MemoryLeaderboard, AppState},
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn create_test_app() -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let state = AppState::with_leaderboard(
        Config::for_tests(TEST_SECRET),
        Arc::new(MemoryLeaderboard::new()),
    );
    create_router(Arc::new(state))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or_else(|_| {
        Value::String(String::from_utf8_lossy(&body).into_owned())
    });
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Issues a session and returns its JSON body.
pub async fn issue_session(app: &Router, user_id: &str, family: &str) -> Value {
    let (status, body) = post_json(
        app,
        "/api/v1/sessions",
        &json!({ "user_id": user_id, "family": family }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

/// Plays `levels.len()` questions the way an honest client would, answering
/// every question correctly.
pub fn honest_log(family: FamilyKind, seed: &str, levels: &[u8]) -> Vec<Value> {
    levels
        .iter()
        .enumerate()
        .map(|(i, level)| {
            let constraint = Constraint::level(*level);
            let q = family.generate(seed, i as u32, &constraint);
            json!({
                "question_id": q.id,
                "selected_answer": q.answer,
                "correct": true,
                "time_ms": 1800,
                "constraint": constraint,
            })
        })
        .collect()
}

pub fn submission(session: &Value, user_id: &str, score: i64, log: Vec<Value>) -> Value {
    json!({
        "user_id": user_id,
        "seed": session["seed"],
        "token": session["token"],
        "expires_at": session["expires_at"],
        "score": score,
        "played_questions": log,
    })
}
