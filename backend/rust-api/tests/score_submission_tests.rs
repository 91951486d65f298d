use axum::http::StatusCode;
use serde_json::json;

use mathrush_api::generator::FamilyKind;

mod common;

const PER_QUESTION_CEILING: i64 = 20;

#[tokio::test]
async fn test_honest_session_is_accepted() {
    let app = common::create_test_app();
    let session = common::issue_session(&app, "ada", "general").await;
    let seed = session["seed"].as_str().unwrap();
    let log = common::honest_log(FamilyKind::General, seed, &[1, 1, 2, 2, 3, 3, 4, 5]);

    let (status, body) = common::post_json(
        &app,
        "/api/v1/scores",
        &common::submission(&session, "ada", 120, log),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["accepted"], true);
    assert_eq!(body["score"], 120);
    assert_eq!(body["ceiling"], 8 * PER_QUESTION_CEILING);
    assert_eq!(body["improved"], true);
    assert_eq!(body["rank"], 1);
}

#[tokio::test]
async fn test_cognitive_session_is_replayed_with_its_family() {
    let app = common::create_test_app();
    let session = common::issue_session(&app, "bo", "cognitive").await;
    let seed = session["seed"].as_str().unwrap();
    let log = common::honest_log(FamilyKind::Cognitive, seed, &[2; 6]);

    let (status, body) = common::post_json(
        &app,
        "/api/v1/scores",
        &common::submission(&session, "bo", 60, log),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    // Same log claimed under a general session does not replay
    let general = common::issue_session(&app, "bo", "general").await;
    let wrong_family = common::honest_log(
        FamilyKind::Cognitive,
        general["seed"].as_str().unwrap(),
        &[2; 6],
    );
    let (status, body) = common::post_json(
        &app,
        "/api/v1/scores",
        &common::submission(&general, "bo", 60, wrong_family),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "sequence_mismatch");
}

#[tokio::test]
async fn test_tampered_question_id_is_rejected() {
    let app = common::create_test_app();
    let session = common::issue_session(&app, "cy", "general").await;
    let seed = session["seed"].as_str().unwrap();
    let mut log = common::honest_log(FamilyKind::General, seed, &[1; 5]);
    log[2]["question_id"] = json!(format!("{}-7", seed));

    let (status, body) = common::post_json(
        &app,
        "/api/v1/scores",
        &common::submission(&session, "cy", 10, log),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "sequence_mismatch");

    let (status, _) = common::get(&app, "/api/v1/leaderboard/cy").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_score_above_ceiling_is_implausible() {
    let app = common::create_test_app();
    let session = common::issue_session(&app, "dee", "general").await;
    let seed = session["seed"].as_str().unwrap();
    let log = common::honest_log(FamilyKind::General, seed, &[3; 10]);

    let (status, body) = common::post_json(
        &app,
        "/api/v1/scores",
        &common::submission(&session, "dee", 10 * PER_QUESTION_CEILING + 1, log),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "score_implausible");
}

#[tokio::test]
async fn test_negative_score_is_implausible() {
    let app = common::create_test_app();
    let session = common::issue_session(&app, "eli", "general").await;
    let (status, body) = common::post_json(
        &app,
        "/api/v1/scores",
        &common::submission(&session, "eli", -5, vec![]),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "score_implausible");
}

#[tokio::test]
async fn test_empty_log_with_zero_score_is_accepted() {
    let app = common::create_test_app();
    let session = common::issue_session(&app, "fay", "general").await;
    let (status, body) = common::post_json(
        &app,
        "/api/v1/scores",
        &common::submission(&session, "fay", 0, vec![]),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["ceiling"], 0);
}

#[tokio::test]
async fn test_forged_token_is_unauthorized() {
    let app = common::create_test_app();
    let session = common::issue_session(&app, "gus", "general").await;
    let mut body = common::submission(&session, "gus", 0, vec![]);
    body["token"] = json!("eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl");

    let (status, body) = common::post_json(&app, "/api/v1/scores", &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reason"], "session_invalid");
}

#[tokio::test]
async fn test_token_for_another_seed_is_unauthorized() {
    let app = common::create_test_app();
    let first = common::issue_session(&app, "hal", "general").await;
    let second = common::issue_session(&app, "hal", "general").await;
    let mut body = common::submission(&first, "hal", 0, vec![]);
    body["seed"] = second["seed"].clone();

    let (status, body) = common::post_json(&app, "/api/v1/scores", &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reason"], "session_invalid");
}

#[tokio::test]
async fn test_expired_session_is_unauthorized() {
    use chrono::{Duration, Utc};
    use mathrush_api::services::session_service::SessionIssuer;

    let app = common::create_test_app();
    let issuer = SessionIssuer::new(common::TEST_SECRET, 60);
    let (session, token) = issuer
        .issue_at("ivy", FamilyKind::General, Utc::now() - Duration::minutes(5))
        .unwrap();

    let body = json!({
        "user_id": "ivy",
        "seed": session.seed,
        "token": token,
        "expires_at": session.expires_at,
        "score": 0,
        "played_questions": [],
    });
    let (status, body) = common::post_json(&app, "/api/v1/scores", &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reason"], "session_expired");
}

#[tokio::test]
async fn test_lower_resubmission_does_not_replace_best() {
    let app = common::create_test_app();

    for (score, improved) in [(80, true), (40, false), (81, true)] {
        let session = common::issue_session(&app, "jo", "general").await;
        let seed = session["seed"].as_str().unwrap();
        let log = common::honest_log(FamilyKind::General, seed, &[1; 5]);
        let (status, body) = common::post_json(
            &app,
            "/api/v1/scores",
            &common::submission(&session, "jo", score, log),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["improved"], improved);
    }

    let (status, body) = common::get(&app, "/api/v1/leaderboard/jo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 81);
}
