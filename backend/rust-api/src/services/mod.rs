use std::sync::Arc;

use crate::config::{Config, LeaderboardBackend};
use leaderboard::{LeaderboardStore, MemoryLeaderboard, RedisLeaderboard};
use replay_service::ScoringPolicy;
use score_service::ScoreService;
use session_service::SessionIssuer;

pub mod leaderboard;
pub mod replay_service;
pub mod score_service;
pub mod session_service;

pub struct AppState {
    pub config: Config,
    pub sessions: Arc<SessionIssuer>,
    pub leaderboard: Arc<dyn LeaderboardStore>,
    pub scores: ScoreService,
}

impl AppState {
    /// Builds state for the configured leaderboard backend. The Redis
    /// backend is connected and pinged before the server starts.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let leaderboard: Arc<dyn LeaderboardStore> = match config.leaderboard_backend {
            LeaderboardBackend::Memory => {
                tracing::info!("Using in-memory leaderboard");
                Arc::new(MemoryLeaderboard::new())
            }
            LeaderboardBackend::Redis => {
                Arc::new(RedisLeaderboard::new(connect_redis(&config.redis_uri).await?))
            }
        };
        Ok(Self::with_leaderboard(config, leaderboard))
    }

    pub fn with_leaderboard(config: Config, leaderboard: Arc<dyn LeaderboardStore>) -> Self {
        let sessions = Arc::new(SessionIssuer::new(
            &config.jwt_secret,
            config.session_ttl_seconds,
        ));
        let scores = ScoreService::new(
            sessions.clone(),
            leaderboard.clone(),
            ScoringPolicy::from(&config.scoring),
        );
        Self {
            config,
            sessions,
            leaderboard,
            scores,
        }
    }
}

async fn connect_redis(uri: &str) -> anyhow::Result<redis::aio::ConnectionManager> {
    let client = redis::Client::open(uri)?;

    tracing::info!("Attempting to connect to Redis...");

    let redis = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        redis::aio::ConnectionManager::new(client),
    )
    .await
    .map_err(|_| anyhow::anyhow!("Redis connection timeout after 30s"))??;

    tracing::info!("Redis ConnectionManager created, testing with PING...");

    let mut conn = redis.clone();
    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        redis::cmd("PING").query_async::<String>(&mut conn),
    )
    .await
    .map_err(|_| anyhow::anyhow!("Redis PING timeout after 5s"))??;

    tracing::info!("Redis connection established successfully");
    Ok(redis)
}
