use axum::http::StatusCode;

use mathrush_api::generator::FamilyKind;

mod common;

async fn record(app: &axum::Router, user: &str, score: i64) {
    let session = common::issue_session(app, user, "general").await;
    let seed = session["seed"].as_str().unwrap();
    let log = common::honest_log(FamilyKind::General, seed, &[1; 10]);
    let (status, body) = common::post_json(
        app,
        "/api/v1/scores",
        &common::submission(&session, user, score, log),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn test_top_scores_are_descending() {
    let app = common::create_test_app();
    for (user, score) in [("amy", 50), ("ben", 170), ("cal", 90), ("dan", 120)] {
        record(&app, user, score).await;
    }

    let (status, body) = common::get(&app, "/api/v1/leaderboard?limit=3").await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["entries"].as_array().unwrap();
    let users: Vec<&str> = entries
        .iter()
        .map(|e| e["user_id"].as_str().unwrap())
        .collect();
    assert_eq!(users, vec!["ben", "dan", "cal"]);
    let ranks: Vec<u64> = entries.iter().map(|e| e["rank"].as_u64().unwrap()).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_player_entry_reports_rank() {
    let app = common::create_test_app();
    record(&app, "eve", 30).await;
    record(&app, "fox", 60).await;

    let (status, body) = common::get(&app, "/api/v1/leaderboard/eve").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "eve");
    assert_eq!(body["score"], 30);
    assert_eq!(body["rank"], 2);
}

#[tokio::test]
async fn test_unknown_player_is_not_found() {
    let app = common::create_test_app();
    let (status, body) = common::get(&app, "/api/v1/leaderboard/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["reason"], "not_found");
}

#[tokio::test]
async fn test_empty_leaderboard() {
    let app = common::create_test_app();
    let (status, body) = common::get(&app, "/api/v1/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["entries"].as_array().unwrap().is_empty());
}
