use anyhow::Context;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::RedisError;

use super::{rank_sorted, LeaderboardStore};
use crate::metrics::track_leaderboard_operation;
use crate::models::leaderboard::LeaderboardEntry;
use crate::utils::retry::{retry_when, RetryPolicy};

const DEFAULT_KEY: &str = "leaderboard:best";

/// ZADD only when the new score is strictly greater than the stored one.
const ADD_IF_GREATER: &str = r#"
    local current = redis.call('ZSCORE', KEYS[1], ARGV[1])
    if current and tonumber(current) >= tonumber(ARGV[2]) then
        return 0
    end
    redis.call('ZADD', KEYS[1], ARGV[2], ARGV[1])
    return 1
"#;

/// Sorted-set leaderboard: member = user id, score = best score.
pub struct RedisLeaderboard {
    redis: ConnectionManager,
    key: String,
    retry: RetryPolicy,
    add_if_greater: redis::Script,
}

fn is_transient(e: &RedisError) -> bool {
    e.is_io_error() || e.is_timeout() || e.is_connection_dropped()
}

impl RedisLeaderboard {
    pub fn new(redis: ConnectionManager) -> Self {
        Self::with_key(redis, DEFAULT_KEY)
    }

    pub fn with_key(redis: ConnectionManager, key: impl Into<String>) -> Self {
        Self {
            redis,
            key: key.into(),
            retry: RetryPolicy::default(),
            add_if_greater: redis::Script::new(ADD_IF_GREATER),
        }
    }

    async fn zscore(&self, user_id: &str) -> Result<Option<f64>, RedisError> {
        retry_when(&self.retry, is_transient, || {
            let mut conn = self.redis.clone();
            async move {
                redis::cmd("ZSCORE")
                    .arg(&self.key)
                    .arg(user_id)
                    .query_async::<Option<f64>>(&mut conn)
                    .await
            }
        })
        .await
    }
}

#[async_trait]
impl LeaderboardStore for RedisLeaderboard {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn add_score(&self, user_id: &str, score: i64) -> anyhow::Result<bool> {
        track_leaderboard_operation(self.backend(), "add_score", async {
            let stored: i64 = retry_when(&self.retry, is_transient, || {
                let mut conn = self.redis.clone();
                async move {
                    self.add_if_greater
                        .key(&self.key)
                        .arg(user_id)
                        .arg(score)
                        .invoke_async(&mut conn)
                        .await
                }
            })
            .await
            .context("Failed to execute leaderboard add_score Lua script")?;
            Ok::<_, anyhow::Error>(stored == 1)
        })
        .await
    }

    async fn top_scores(&self, limit: usize) -> anyhow::Result<Vec<LeaderboardEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        track_leaderboard_operation(self.backend(), "top_scores", async {
            let stop = isize::try_from(limit).unwrap_or(isize::MAX) - 1;
            let raw: Vec<(String, f64)> = retry_when(&self.retry, is_transient, || {
                let mut conn = self.redis.clone();
                async move {
                    redis::cmd("ZREVRANGE")
                        .arg(&self.key)
                        .arg(0)
                        .arg(stop)
                        .arg("WITHSCORES")
                        .query_async(&mut conn)
                        .await
                }
            })
            .await
            .context("Failed to read leaderboard range")?;

            let sorted = raw
                .into_iter()
                .map(|(user, score)| (user, score.round() as i64))
                .collect();
            Ok::<_, anyhow::Error>(rank_sorted(sorted))
        })
        .await
    }

    async fn rank(&self, user_id: &str) -> anyhow::Result<Option<u64>> {
        track_leaderboard_operation(self.backend(), "rank", async {
            let Some(own) = self
                .zscore(user_id)
                .await
                .context("Failed to read leaderboard score")?
            else {
                return Ok(None);
            };

            let exclusive_min = format!("({}", own);
            let ahead: u64 = retry_when(&self.retry, is_transient, || {
                let mut conn = self.redis.clone();
                let exclusive_min = exclusive_min.clone();
                async move {
                    redis::cmd("ZCOUNT")
                        .arg(&self.key)
                        .arg(exclusive_min)
                        .arg("+inf")
                        .query_async(&mut conn)
                        .await
                }
            })
            .await
            .context("Failed to count leaderboard entries ahead")?;
            Ok::<_, anyhow::Error>(Some(ahead + 1))
        })
        .await
    }

    async fn score(&self, user_id: &str) -> anyhow::Result<Option<i64>> {
        track_leaderboard_operation(self.backend(), "score", async {
            let score = self
                .zscore(user_id)
                .await
                .context("Failed to read leaderboard score")?;
            Ok::<_, anyhow::Error>(score.map(|s| s.round() as i64))
        })
        .await
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.redis.clone();
        tokio::time::timeout(
            std::time::Duration::from_secs(2),
            redis::cmd("PING").query_async::<String>(&mut conn),
        )
        .await
        .map_err(|_| anyhow::anyhow!("Redis PING timeout after 2s"))??;
        Ok(())
    }
}
