use std::env;

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_token_url() -> String {
    "https://securetoken.googleapis.com/v1".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AuthConfig {
    /// Identity provider web API key. Empty disables sign-in.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_url")]
    pub url: String,
    /// Exchanges refresh tokens for new id tokens
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl AuthConfig {
    pub fn new() -> Self {
        let api_key = env::var("AUTH_API_KEY").unwrap_or_default();
        let url = env::var("AUTH_URL").unwrap_or_else(|_| default_url());
        let token_url = env::var("AUTH_TOKEN_URL").unwrap_or_else(|_| default_token_url());

        Self {
            api_key,
            url,
            token_url,
        }
    }

    pub fn enabled(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            url: default_url(),
            token_url: default_token_url(),
        }
    }
}
