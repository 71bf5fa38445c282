use std::env;

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    // translations of a whole song take a while
    120
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the translation/chat service
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl BackendConfig {
    pub fn new() -> Self {
        let url = env::var("BACKEND_URL").unwrap_or_else(|_| default_url());

        let timeout_seconds = env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self {
            url,
            timeout_seconds,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
