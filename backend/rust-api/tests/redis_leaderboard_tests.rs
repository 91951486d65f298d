// Runs against a live Redis (REDIS_URI, default localhost).
// cargo test --test redis_leaderboard_tests -- --ignored

use mathrush_api::services::leaderboard::{LeaderboardStore, RedisLeaderboard};
use redis::aio::ConnectionManager;

async fn board() -> (RedisLeaderboard, ConnectionManager, String) {
    let redis_uri =
        std::env::var("REDIS_URI").unwrap_or_else(|_| "redis://127.0.0.1:6379/0".to_string());
    let client = redis::Client::open(redis_uri).expect("Invalid REDIS_URI");
    let conn = ConnectionManager::new(client)
        .await
        .expect("Failed to connect to Redis");
    let key = format!("leaderboard:test:{}", uuid::Uuid::new_v4());
    (RedisLeaderboard::with_key(conn.clone(), key.clone()), conn, key)
}

async fn cleanup(mut conn: ConnectionManager, key: &str) {
    let _: () = redis::cmd("DEL")
        .arg(key)
        .query_async(&mut conn)
        .await
        .expect("Failed to delete test key");
}

#[tokio::test]
#[ignore]
async fn redis_only_strictly_greater_scores_win() {
    let (board, conn, key) = board().await;

    assert!(board.add_score("ann", 40).await.unwrap());
    assert!(!board.add_score("ann", 40).await.unwrap());
    assert!(!board.add_score("ann", 10).await.unwrap());
    assert!(board.add_score("ann", 41).await.unwrap());
    assert_eq!(board.score("ann").await.unwrap(), Some(41));

    cleanup(conn, &key).await;
}

#[tokio::test]
#[ignore]
async fn redis_top_scores_are_descending_and_limited() {
    let (board, conn, key) = board().await;
    for (user, score) in [("a", 10), ("b", 70), ("c", 30), ("d", 70), ("e", 5)] {
        board.add_score(user, score).await.unwrap();
    }

    let top = board.top_scores(3).await.unwrap();
    let scores: Vec<i64> = top.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![70, 70, 30]);
    assert_eq!(top[0].rank, 1);
    assert_eq!(top[1].rank, 1);
    assert_eq!(top[2].user_id, "c");
    assert_eq!(top[2].rank, 3);

    // Ties are counted through the exclusive ZCOUNT bound.
    assert_eq!(board.rank("b").await.unwrap(), Some(1));
    assert_eq!(board.rank("d").await.unwrap(), Some(1));
    assert_eq!(board.rank("c").await.unwrap(), Some(3));
    assert_eq!(board.rank("e").await.unwrap(), Some(5));
    assert_eq!(board.rank("nobody").await.unwrap(), None);
    assert!(board.top_scores(0).await.unwrap().is_empty());

    cleanup(conn, &key).await;
}

#[tokio::test]
#[ignore]
async fn redis_entry_and_ping() {
    let (board, conn, key) = board().await;
    board.ping().await.unwrap();
    board.add_score("a", 5).await.unwrap();
    board.add_score("b", 9).await.unwrap();

    let entry = board.entry("a").await.unwrap().unwrap();
    assert_eq!(entry.score, 5);
    assert_eq!(entry.rank, 2);
    assert!(board.entry("zed").await.unwrap().is_none());

    cleanup(conn, &key).await;
}
