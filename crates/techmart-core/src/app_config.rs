use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL including the `/api` prefix, e.g. `https://shop.example.com/api`.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Directory backing local storage (cart contents and session tokens).
    pub state_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Retry budget for idempotent reads. Writes are never retried.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Upper bound on any single checkout step (order creation, confirmation, verification).
    pub checkout_timeout_secs: u64,
    /// How long the payment widget may stay open before the attempt is abandoned.
    pub payment_window_secs: u64,
}
