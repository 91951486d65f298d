use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardBackend {
    Memory,
    Redis,
}

impl LeaderboardBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

/// Limits used when replaying a submitted session. Read from the `scoring`
/// table; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_points: i64,
    pub max_speed_bonus: i64,
    pub max_combo_bonus: i64,
    pub min_answer_ms: u64,
    pub max_questions: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points: 10,
            max_speed_bonus: 5,
            max_combo_bonus: 5,
            min_answer_ms: 150,
            max_questions: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub session_ttl_seconds: i64,
    pub leaderboard_backend: LeaderboardBackend,
    pub redis_uri: String,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first (two levels up), then local .env
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml + APP__ env overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

        let jwt_secret = match settings
            .get_string("auth.jwt_secret")
            .or_else(|_| env::var("JWT_SECRET"))
        {
            Ok(secret) => secret,
            Err(_) if env == "prod" => {
                return Err(config::ConfigError::Message(
                    "JWT_SECRET must be set in production".to_string(),
                ));
            }
            Err(_) => {
                eprintln!("WARNING: Using default JWT_SECRET (dev mode only!)");
                "dev-secret-only-for-local-testing".to_string()
            }
        };

        let session_ttl_seconds = settings
            .get_int("session.ttl_seconds")
            .ok()
            .or_else(|| {
                env::var("SESSION_DURATION_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok())
            })
            .filter(|v| *v > 0)
            .unwrap_or(900);

        let backend_name = settings
            .get_string("leaderboard.backend")
            .or_else(|_| env::var("LEADERBOARD_BACKEND"))
            .unwrap_or_else(|_| "memory".to_string());
        let leaderboard_backend = LeaderboardBackend::parse(&backend_name).ok_or_else(|| {
            config::ConfigError::Message(format!("unknown leaderboard backend: {backend_name}"))
        })?;

        let redis_uri = settings
            .get_string("redis.uri")
            .or_else(|_| env::var("REDIS_URI"))
            .unwrap_or_else(|_| {
                let host = env::var("REDIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
                let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
                match env::var("REDIS_PASSWORD") {
                    Ok(password) => format!("redis://:{}@{}:{}/0", password, host, port),
                    Err(_) => format!("redis://{}:{}/0", host, port),
                }
            });

        let scoring = match settings.get::<ScoringConfig>("scoring") {
            Ok(scoring) => scoring,
            Err(config::ConfigError::NotFound(_)) => ScoringConfig::default(),
            Err(e) => return Err(e),
        };

        Ok(Config {
            bind_addr,
            jwt_secret,
            session_ttl_seconds,
            leaderboard_backend,
            redis_uri,
            scoring,
        })
    }

    /// In-memory configuration for tests and local tools.
    pub fn for_tests(jwt_secret: &str) -> Self {
        Config {
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: jwt_secret.to_string(),
            session_ttl_seconds: 900,
            leaderboard_backend: LeaderboardBackend::Memory,
            redis_uri: "redis://127.0.0.1:6379/0".to_string(),
            scoring: ScoringConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "JWT_SECRET",
            "LEADERBOARD_BACKEND",
            "SESSION_DURATION_SECONDS",
            "BIND_ADDR",
            "APP__SCORING__BASE_POINTS",
            "APP__SCORING__MIN_ANSWER_MS",
        ] {
            env::remove_var(key);
        }
        env::set_var("SKIP_ROOT_ENV", "1");
    }

    #[test]
    #[serial]
    fn defaults_apply_in_dev() {
        clear_env();
        let config = Config::load().unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8081");
        assert_eq!(config.session_ttl_seconds, 900);
        assert_eq!(config.leaderboard_backend, LeaderboardBackend::Memory);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    #[serial]
    fn env_overrides_are_respected() {
        clear_env();
        env::set_var("JWT_SECRET", "from-env");
        env::set_var("LEADERBOARD_BACKEND", "Redis");
        env::set_var("SESSION_DURATION_SECONDS", "120");
        let config = Config::load().unwrap();
        assert_eq!(config.jwt_secret, "from-env");
        assert_eq!(config.leaderboard_backend, LeaderboardBackend::Redis);
        assert_eq!(config.session_ttl_seconds, 120);
        clear_env();
    }

    #[test]
    #[serial]
    fn scoring_table_overrides_only_given_keys() {
        clear_env();
        env::set_var("APP__SCORING__BASE_POINTS", "12");
        env::set_var("APP__SCORING__MIN_ANSWER_MS", "200");
        let config = Config::load().unwrap();
        assert_eq!(config.scoring.base_points, 12);
        assert_eq!(config.scoring.min_answer_ms, 200);
        assert_eq!(config.scoring.max_combo_bonus, 5);
        assert_eq!(config.scoring.max_questions, 500);
        clear_env();
    }

    #[test]
    #[serial]
    fn production_requires_a_secret() {
        clear_env();
        env::set_var("APP_ENV", "prod");
        assert!(Config::load().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn unknown_backend_is_rejected() {
        clear_env();
        env::set_var("LEADERBOARD_BACKEND", "blob");
        assert!(Config::load().is_err());
        clear_env();
    }
}
