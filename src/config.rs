use std::env;

use crate::rate_limit::RateLimitPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: String,
    pub rate_limit_max_attempts: u32,
    pub rate_limit_window_minutes: u64,
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("ASSETSAFE_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let rate_limit_max_attempts = env::var("RATE_LIMIT_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let rate_limit_window_minutes = env::var("RATE_LIMIT_WINDOW_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        Self {
            storage_path: env::var("ASSETSAFE_STORAGE_PATH")
                .unwrap_or_else(|_| "assetsafe.db".to_string()),
            rate_limit_max_attempts,
            rate_limit_window_minutes,
            dev_mode,
        }
    }

    /// Default policy for rate-limited actions, from the environment.
    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy::new(self.rate_limit_max_attempts, self.rate_limit_window_minutes)
    }
}
