use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{rank_sorted, LeaderboardStore};
use crate::models::leaderboard::LeaderboardEntry;

/// Process-local leaderboard. Lost on restart.
#[derive(Default)]
pub struct MemoryLeaderboard {
    scores: RwLock<HashMap<String, i64>>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaderboardStore for MemoryLeaderboard {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn add_score(&self, user_id: &str, score: i64) -> anyhow::Result<bool> {
        let mut scores = self.scores.write().await;
        match scores.get(user_id) {
            Some(best) if *best >= score => Ok(false),
            _ => {
                scores.insert(user_id.to_string(), score);
                Ok(true)
            }
        }
    }

    async fn top_scores(&self, limit: usize) -> anyhow::Result<Vec<LeaderboardEntry>> {
        let scores = self.scores.read().await;
        let mut sorted: Vec<(String, i64)> =
            scores.iter().map(|(u, s)| (u.clone(), *s)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted.truncate(limit);
        Ok(rank_sorted(sorted))
    }

    async fn rank(&self, user_id: &str) -> anyhow::Result<Option<u64>> {
        let scores = self.scores.read().await;
        Ok(scores.get(user_id).map(|own| {
            let ahead = scores.values().filter(|s| *s > own).count();
            ahead as u64 + 1
        }))
    }

    async fn score(&self, user_id: &str) -> anyhow::Result<Option<i64>> {
        Ok(self.scores.read().await.get(user_id).copied())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
