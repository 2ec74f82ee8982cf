use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation backend (search, recommendations, posters)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin allowed to call the session API from a browser
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Quiet period after the last keystroke before a search fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed query length that triggers a search
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Cards revealed initially and per "load more"
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Drop the previous recommendation list when a fetch fails
    #[serde(default = "default_clear_on_error")]
    pub clear_recommendations_on_error: bool,

    /// Whole-request timeout for backend calls; unset means wait forever
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_query_len() -> usize {
    2
}

fn default_page_size() -> usize {
    8
}

fn default_clear_on_error() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            page_size: default_page_size(),
            clear_recommendations_on_error: default_clear_on_error(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
