//! Best-score-per-player storage behind one interface.
//!
//! Every backend keeps the highest score a player ever submitted: a write
//! only lands when it is strictly greater than what is stored. Ranks use
//! competition ranking (ties share a rank, the next rank is skipped).

use async_trait::async_trait;

use crate::models::leaderboard::LeaderboardEntry;

pub mod memory;
pub mod redis;

pub use memory::MemoryLeaderboard;
pub use self::redis::RedisLeaderboard;

#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Short backend name for logs and metrics.
    fn backend(&self) -> &'static str;

    /// Stores `score` if it beats the player's best. Returns whether it did.
    async fn add_score(&self, user_id: &str, score: i64) -> anyhow::Result<bool>;

    /// Highest scores first, at most `limit` entries.
    async fn top_scores(&self, limit: usize) -> anyhow::Result<Vec<LeaderboardEntry>>;

    /// 1-based rank, `None` for unknown players.
    async fn rank(&self, user_id: &str) -> anyhow::Result<Option<u64>>;

    async fn score(&self, user_id: &str) -> anyhow::Result<Option<i64>>;

    async fn ping(&self) -> anyhow::Result<()>;

    async fn entry(&self, user_id: &str) -> anyhow::Result<Option<LeaderboardEntry>> {
        let Some(score) = self.score(user_id).await? else {
            return Ok(None);
        };
        let rank = self.rank(user_id).await?.unwrap_or(1);
        Ok(Some(LeaderboardEntry {
            user_id: user_id.to_string(),
            score,
            rank,
        }))
    }
}

/// Assigns competition ranks to `(user, score)` pairs already sorted by
/// descending score.
fn rank_sorted(sorted: Vec<(String, i64)>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(sorted.len());
    for (position, (user_id, score)) in sorted.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.score == score => prev.rank,
            _ => position as u64 + 1,
        };
        entries.push(LeaderboardEntry {
            user_id,
            score,
            rank,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_share_a_rank() {
        let entries = rank_sorted(vec![
            ("a".into(), 50),
            ("b".into(), 40),
            ("c".into(), 40),
            ("d".into(), 10),
        ]);
        let ranks: Vec<u64> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 2, 4]);
    }
}
